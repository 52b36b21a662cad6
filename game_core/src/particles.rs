//! Cosmetic sparkle trail behind the ball.

use glam::Vec2;

use crate::{Config, GameRng};

/// A single sparkle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub colour: u8,
    pub born: u64, // tick the particle was emitted
}

/// Emits sparkles around the ball while switched on.
///
/// On/off is a counter so overlapping sparkle pickups nest.
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    particles: Vec<Particle>,
    enabled: u32,
    lifetime: u64,
    radius: f32,
    colours: (u8, u8),
}

impl ParticleEmitter {
    pub fn new(config: &Config) -> Self {
        Self {
            particles: Vec::new(),
            enabled: 0,
            lifetime: config.particle_lifetime,
            radius: config.particle_radius,
            colours: (config.particle_colour_min, config.particle_colour_max),
        }
    }

    pub fn is_on(&self) -> bool {
        self.enabled > 0
    }

    pub fn turn_on(&mut self) {
        self.enabled += 1;
    }

    pub fn turn_off(&mut self) {
        self.enabled = self
            .enabled
            .checked_sub(1)
            .expect("turn_off called without matching turn_on");
    }

    /// Emit one particle near `center` on even ticks while switched on
    pub fn sparkle(&mut self, now: u64, center: Vec2, rng: &mut GameRng) {
        if !self.is_on() || now % 2 != 0 {
            return;
        }
        let offset = Vec2::new(
            rng.range_f32(-self.radius, self.radius),
            rng.range_f32(-self.radius, self.radius),
        );
        self.particles.push(Particle {
            pos: center + offset,
            colour: rng.range_u8(self.colours.0, self.colours.1),
            born: now,
        });
    }

    /// Draw live particles and drop those that have lived out their lifetime,
    /// in a single pass.
    pub fn display(&mut self, now: u64, mut draw: impl FnMut(&Particle)) {
        let lifetime = self.lifetime;
        self.particles.retain(|particle| {
            let alive = now.saturating_sub(particle.born) < lifetime;
            if alive {
                draw(particle);
            }
            alive
        });
    }

    /// Drop expired particles without drawing
    pub fn expire(&mut self, now: u64) {
        self.display(now, |_| {});
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
