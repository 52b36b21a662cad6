use crate::hooks::InputSource;
use crate::{Ball, BallMove, Events, Paddle, Side};
use hecs::World;

/// Apply held controls to every paddle
pub fn move_paddles(world: &mut World, input: &impl InputSource) {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        paddle.update(input);
    }
}

/// Move ball based on velocity; returns the side that scored, if any
pub fn move_ball(world: &mut World, events: &mut Events) -> Option<Side> {
    let mut scorer = None;
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        match ball.update() {
            BallMove::Scored(side) => scorer = Some(side),
            BallMove::HitWall => events.ball_hit_wall = true,
            BallMove::Free => {}
        }
    }
    scorer
}
