use glam::Vec2;

use crate::geometry::{overlap, random_direction, Collider, Rect};
use crate::hooks::{Control, InputSource};
use crate::pickups::PickupKind;
use crate::{Config, GameRng};

/// Which half of the board a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Paddle component - represents a player's paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2,
    pub size: Vec2,
    pub move_speed: f32,
    pub colour: u8,
    pub control_up: Control,
    pub control_down: Control,
    pub board: Vec2,
}

impl Paddle {
    pub fn new(side: Side, config: &Config) -> Self {
        let (control_up, control_down) = match side {
            Side::Left => (config.left_up, config.left_down),
            Side::Right => (config.right_up, config.right_down),
        };
        Self {
            side,
            pos: Vec2::new(config.paddle_x(side), config.paddle_start_y()),
            size: Vec2::new(config.paddle_width, config.paddle_height),
            move_speed: config.paddle_speed,
            colour: config.paddle_colour,
            control_up,
            control_down,
            board: config.board_size(),
        }
    }

    /// Move up or down (up wins when both are held), then clamp to the board
    pub fn update(&mut self, input: &impl InputSource) {
        if input.is_held(self.control_up) {
            self.pos.y -= self.move_speed;
        } else if input.is_held(self.control_down) {
            self.pos.y += self.move_speed;
        }
        self.clamp();
    }

    /// Resize vertically around the current centre
    pub fn set_height(&mut self, height: f32) {
        let center = self.pos.y + self.size.y / 2.0;
        self.size.y = height;
        self.pos.y = center - height / 2.0;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.pos.y = self.pos.y.clamp(0.0, self.board.y - self.size.y);
    }
}

impl Collider for Paddle {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Result of advancing the ball by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallMove {
    Free,
    HitWall,
    /// Ball left the board; the given side scores
    Scored(Side),
}

/// Constants the ball needs for its own physics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallPhysics {
    pub spin: f32,
    pub bounce: f32,
    pub bounce_friction: f32,
    pub giant_delta: f32,
    pub contact_gap: f32,
}

impl BallPhysics {
    pub fn from_config(config: &Config) -> Self {
        Self {
            spin: config.spin,
            bounce: config.bounce,
            bounce_friction: config.bounce_friction,
            giant_delta: config.giant_delta,
            contact_gap: config.contact_gap,
        }
    }
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub colour: u8,
    pub board: Vec2,
    /// Serve position restored by `reset`
    pub start: Vec2,
    /// Initial speed magnitude per axis
    pub speed: f32,
    /// Bounce mode is on while this is non-zero
    pub bounce_status: u32,
    /// Giant mode is on while this is non-zero
    pub size_status: u32,
    pub physics: BallPhysics,
}

impl Ball {
    /// Ball at the serve position, heading in a random diagonal
    pub fn new(config: &Config, rng: &mut GameRng) -> Self {
        let mut ball = Self {
            pos: config.ball_start(),
            vel: Vec2::ZERO,
            size: Vec2::splat(config.ball_size),
            colour: config.ball_colour,
            board: config.board_size(),
            start: config.ball_start(),
            speed: config.ball_speed,
            bounce_status: 0,
            size_status: 0,
            physics: BallPhysics::from_config(config),
        };
        ball.reset(rng);
        ball
    }

    /// Advance by one tick.
    ///
    /// Side exits are checked before the walls: a ball past either side
    /// reports the score and is left where it is for the caller to re-serve.
    pub fn update(&mut self) -> BallMove {
        self.pos += self.vel;

        if self.pos.x < 0.0 {
            return BallMove::Scored(Side::Right);
        } else if self.pos.x + self.size.x > self.board.x {
            return BallMove::Scored(Side::Left);
        }

        let mut result = BallMove::Free;
        if self.pos.y < 0.0 {
            self.pos.y = -self.pos.y;
            self.vel.y = -self.vel.y;
            result = BallMove::HitWall;
        } else if self.pos.y + self.size.y > self.board.y {
            self.pos.y = 2.0 * self.board.y - self.pos.y - 2.0 * self.size.y;
            self.vel.y = -self.vel.y;
            if self.bounce_status > 0 {
                self.vel.y += self.physics.bounce_friction;
            }
            result = BallMove::HitWall;
        }

        if self.bounce_status > 0 {
            self.vel.y += self.physics.bounce;
        }

        result
    }

    /// Bounce off the first overlapping paddle, if any
    pub fn check_collision(&mut self, paddles: &[Paddle]) -> bool {
        for paddle in paddles {
            if !overlap(&*self, paddle) {
                continue;
            }

            self.spin_ball(paddle);
            self.vel.x = -self.vel.x;

            // Snap flush against the paddle so the ball never sinks into it
            let ball_center = self.pos.x + self.size.x / 2.0;
            let paddle_center = paddle.pos.x + paddle.size.x / 2.0;
            if ball_center > paddle_center {
                self.pos.x = paddle.pos.x + paddle.size.x + self.physics.contact_gap;
            } else {
                self.pos.x = paddle.pos.x - self.size.x - self.physics.contact_gap;
            }
            return true;
        }
        false
    }

    /// Angle the return by where on the paddle the ball struck.
    /// Offset is normalised to about [-1, 1] across the paddle face.
    pub fn spin_ball(&mut self, paddle: &Paddle) {
        let half_height = paddle.size.y / 2.0;
        let ball_center = self.pos.y + self.size.y / 2.0;
        let offset = (ball_center - paddle.pos.y - half_height) / half_height;
        self.vel.y += offset * self.physics.spin;
    }

    /// Back to the serve position with fresh random directions.
    /// Size and colour carry over.
    pub fn reset(&mut self, rng: &mut GameRng) {
        self.pos = self.start;
        self.vel = Vec2::new(
            self.speed * random_direction(rng),
            self.speed * random_direction(rng),
        );
    }

    pub fn bounce_on(&mut self) {
        self.bounce_status += 1;
    }

    pub fn bounce_off(&mut self) {
        self.bounce_status = self
            .bounce_status
            .checked_sub(1)
            .expect("bounce_off called without matching bounce_on");
    }

    /// Grow around the centre; nested calls only count
    pub fn giant_on(&mut self) {
        if self.size_status == 0 {
            self.resize(self.physics.giant_delta);
        }
        self.size_status += 1;
    }

    pub fn giant_off(&mut self) {
        self.size_status = self
            .size_status
            .checked_sub(1)
            .expect("giant_off called without matching giant_on");
        if self.size_status == 0 {
            self.resize(-self.physics.giant_delta);
        }
    }

    fn resize(&mut self, delta: f32) {
        self.size += Vec2::splat(delta);
        self.pos -= Vec2::splat(delta / 2.0);
    }
}

impl Collider for Ball {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A pickup waiting on the board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupItem {
    pub kind: PickupKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Collider for PickupItem {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}
