use rand::Rng;

use crate::pickups::PickupKind;
use crate::Side;

/// Simulation clock: one tick per frame, advanced by the frontend only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Time {
    pub now: u64,
}

impl Time {
    pub fn new(now: u64) -> Self {
        Self { now }
    }

    pub fn advance(&mut self) {
        self.now += 1;
    }
}

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u8,  // Left player score
    pub right: u8, // Right player score
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn has_winner(&self, win_score: u8) -> Option<Side> {
        if self.left >= win_score {
            Some(Side::Left)
        } else if self.right >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// +1.0 or -1.0
    pub fn direction(&mut self) -> f32 {
        if self.0.gen_bool(0.5) {
            1.0
        } else {
            -1.0
        }
    }

    /// Uniform in [min, max]
    pub fn range_u64(&mut self, min: u64, max: u64) -> u64 {
        self.0.gen_range(min..=max)
    }

    /// Uniform in [min, max]
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        self.0.gen_range(min..=max)
    }

    /// Uniform in [min, max]
    pub fn range_u8(&mut self, min: u8, max: u8) -> u8 {
        self.0.gen_range(min..=max)
    }

    /// Uniform index into a non-empty collection of `len` items
    pub fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    pub left_scored: bool,
    pub right_scored: bool,
    pub ball_hit_paddle: bool,
    pub ball_hit_wall: bool,
    pub pickup_taken: Option<PickupKind>,
    pub finished: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn scored(&mut self, side: Side) {
        match side {
            Side::Left => self.left_scored = true,
            Side::Right => self.right_scored = true,
        }
    }
}

/// Countdown before the ball is put in play
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeTimer {
    pub deadline: u64, // Tick at which play resumes
}

impl ServeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_delay(&mut self, now: u64, delay: u64) {
        self.deadline = now + delay;
    }

    pub fn can_serve(&self, now: u64) -> bool {
        now >= self.deadline
    }
}
