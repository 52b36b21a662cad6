use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::Rect;
use crate::hooks::Control;
use crate::params::Params;
use crate::pickups::StackPolicy;
use crate::Side;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board_width: f32,
    pub board_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_offset: f32,
    pub paddle_speed: f32,
    pub paddle_colour: u8,
    pub left_up: Control,
    pub left_down: Control,
    pub right_up: Control,
    pub right_down: Control,

    pub ball_size: f32,
    pub ball_speed: f32,
    pub ball_colour: u8,
    pub spin: f32,
    pub bounce: f32,
    pub bounce_friction: f32,
    pub giant_delta: f32,
    pub contact_gap: f32,

    pub serve_delay: u64,
    pub speedup_period: u64,
    pub speedup_amount: f32,
    pub win_score: u8,

    pub pickup_interval_min: u64,
    pub pickup_interval_max: u64,
    pub pickup_size: f32,
    pub pickup_duration: u64,
    pub pickup_margin: f32,
    pub stack_policy: StackPolicy,

    pub expand_height: f32,
    pub expand_colour: u8,
    pub slow_factor: f32,
    pub slow_colour: u8,

    pub particle_lifetime: u64,
    pub particle_radius: f32,
    pub particle_colour_min: u8,
    pub particle_colour_max: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_width: Params::BOARD_WIDTH,
            board_height: Params::BOARD_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_offset: Params::PADDLE_OFFSET,
            paddle_speed: Params::PADDLE_SPEED,
            paddle_colour: Params::PADDLE_COLOUR,
            left_up: Control::W,
            left_down: Control::S,
            right_up: Control::UP,
            right_down: Control::DOWN,
            ball_size: Params::BALL_SIZE,
            ball_speed: Params::BALL_SPEED,
            ball_colour: Params::BALL_COLOUR,
            spin: Params::SPIN,
            bounce: Params::BOUNCE,
            bounce_friction: Params::BOUNCE_FRICTION,
            giant_delta: Params::GIANT_DELTA,
            contact_gap: Params::CONTACT_GAP,
            serve_delay: Params::SERVE_DELAY,
            speedup_period: Params::SPEEDUP_PERIOD,
            speedup_amount: Params::SPEEDUP_AMOUNT,
            win_score: Params::WIN_SCORE,
            pickup_interval_min: Params::PICKUP_INTERVAL_MIN,
            pickup_interval_max: Params::PICKUP_INTERVAL_MAX,
            pickup_size: Params::PICKUP_SIZE,
            pickup_duration: Params::PICKUP_DURATION,
            pickup_margin: Params::PICKUP_MARGIN,
            stack_policy: StackPolicy::default(),
            expand_height: Params::EXPAND_HEIGHT,
            expand_colour: Params::EXPAND_COLOUR,
            slow_factor: Params::SLOW_FACTOR,
            slow_colour: Params::SLOW_COLOUR,
            particle_lifetime: Params::PARTICLE_LIFETIME,
            particle_radius: Params::PARTICLE_RADIUS,
            particle_colour_min: Params::PARTICLE_COLOUR_MIN,
            particle_colour_max: Params::PARTICLE_COLOUR_MAX,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would degenerate clamping or scheduling
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("board_width", self.board_width as f64),
            ("board_height", self.board_height as f64),
            ("paddle_width", self.paddle_width as f64),
            ("paddle_height", self.paddle_height as f64),
            ("paddle_speed", self.paddle_speed as f64),
            ("ball_size", self.ball_size as f64),
            ("ball_speed", self.ball_speed as f64),
            ("giant_delta", self.giant_delta as f64),
            ("contact_gap", self.contact_gap as f64),
            ("speedup_period", self.speedup_period as f64),
            ("speedup_amount", self.speedup_amount as f64),
            ("win_score", self.win_score as f64),
            ("pickup_interval_min", self.pickup_interval_min as f64),
            ("pickup_size", self.pickup_size as f64),
            ("pickup_duration", self.pickup_duration as f64),
            ("expand_height", self.expand_height as f64),
            ("slow_factor", self.slow_factor as f64),
            ("particle_lifetime", self.particle_lifetime as f64),
            ("particle_radius", self.particle_radius as f64),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("paddle_offset", self.paddle_offset),
            ("pickup_margin", self.pickup_margin),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Negative {
                    field,
                    value: value as f64,
                });
            }
        }

        let fits = [
            ("paddle", self.paddle_height, self.board_height),
            ("expanded paddle", self.expand_height, self.board_height),
            ("ball", self.ball_size, self.board_height),
            (
                "giant ball",
                self.ball_size + self.giant_delta,
                self.board_height,
            ),
            (
                "paddle lanes",
                2.0 * (self.paddle_offset + self.paddle_width) + self.ball_size,
                self.board_width,
            ),
        ];
        for (entity, size, board) in fits {
            if size >= board {
                return Err(ConfigError::DoesNotFit {
                    entity,
                    size,
                    board,
                });
            }
        }

        if self.pickup_interval_min > self.pickup_interval_max {
            return Err(ConfigError::InvertedInterval {
                min: self.pickup_interval_min,
                max: self.pickup_interval_max,
            });
        }

        let field = self.pickup_field();
        if field.size.x < self.pickup_size || field.size.y < self.pickup_size {
            return Err(ConfigError::EmptyPickupField);
        }

        if self.particle_colour_min > self.particle_colour_max {
            return Err(ConfigError::InvertedPalette {
                min: self.particle_colour_min,
                max: self.particle_colour_max,
            });
        }

        Ok(())
    }

    /// Get X position (left edge) for the paddle on the given side
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_offset,
            Side::Right => self.board_width - self.paddle_offset - self.paddle_width,
        }
    }

    /// Paddles start vertically centred
    pub fn paddle_start_y(&self) -> f32 {
        (self.board_height - self.paddle_height) / 2.0
    }

    /// Top-left corner of the ball at every serve
    pub fn ball_start(&self) -> Vec2 {
        Vec2::new(
            (self.board_width - self.ball_size) / 2.0,
            (self.board_height - self.ball_size) / 2.0,
        )
    }

    pub fn board_size(&self) -> Vec2 {
        Vec2::new(self.board_width, self.board_height)
    }

    /// Area where pickups may spawn, inset so they never sit under a paddle
    pub fn pickup_field(&self) -> Rect {
        let inset = self.paddle_offset + self.paddle_width + self.pickup_margin;
        Rect::new(
            Vec2::new(inset, 0.0),
            Vec2::new(self.board_width - 2.0 * inset, self.board_height),
        )
    }
}
