use glam::Vec2;

use crate::GameRng;

/// Axis-aligned rectangle: top-left corner plus size, y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Anything that takes part in overlap tests
pub trait Collider {
    fn rect(&self) -> Rect;
}

impl Collider for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}

/// Closed-interval overlap: rectangles that only touch still overlap
pub fn overlap(a: &impl Collider, b: &impl Collider) -> bool {
    let a = a.rect();
    let b = b.rect();
    !(a.right() < b.left()
        || b.right() < a.left()
        || a.bottom() < b.top()
        || b.bottom() < a.top())
}

/// Sign of a number, with zero counted as positive
pub fn sign(n: f32) -> f32 {
    if n >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// +1 or -1 with equal probability
pub fn random_direction(rng: &mut GameRng) -> f32 {
    rng.direction()
}
