pub mod components;
pub mod config;
pub mod effects;
pub mod error;
pub mod game;
pub mod geometry;
pub mod hooks;
pub mod params;
pub mod particles;
pub mod pickups;
pub mod resources;
pub mod systems;
pub mod track;

pub use components::*;
pub use config::*;
pub use error::*;
pub use game::*;
pub use params::*;
pub use particles::*;
pub use resources::*;

use hecs::World;

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, side: Side, config: &Config) -> hecs::Entity {
    world.spawn((Paddle::new(side, config),))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, config: &Config, rng: &mut GameRng) -> hecs::Entity {
    world.spawn((Ball::new(config, rng),))
}
