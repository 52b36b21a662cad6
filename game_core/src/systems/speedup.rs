use crate::geometry::sign;
use crate::Ball;
use hecs::World;
use log::trace;

/// Push both velocity components further along their current direction
pub fn speed_up(world: &mut World, amount: f32) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.vel.x += sign(ball.vel.x) * amount;
        ball.vel.y += sign(ball.vel.y) * amount;
        trace!("Ball sped up to ({:.3}, {:.3})", ball.vel.x, ball.vel.y);
    }
}
