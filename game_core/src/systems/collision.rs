use crate::{Ball, Events, Paddle};
use hecs::{Entity, World};

/// Bounce the ball off the paddles, tested in the given order
pub fn check_paddle_collisions(
    world: &mut World,
    paddles: &[Entity],
    events: &mut Events,
) -> bool {
    // Copy paddles out first so the ball can be borrowed mutably
    let paddles: Vec<Paddle> = paddles
        .iter()
        .filter_map(|&entity| world.get::<&Paddle>(entity).ok().map(|p| *p))
        .collect();

    let mut hit = false;
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        hit |= ball.check_collision(&paddles);
    }
    events.ball_hit_paddle |= hit;
    hit
}
