//! Pickups: scheduled spawning, collection by the ball, and the timed
//! conditions they switch on.
//!
//! A pickup kind's effect is exposed in three ways:
//! 1. `PickupManager::is_condition_active(kind)` while its clock runs
//! 2. `PickupEffect::enter` when the ball collects it
//! 3. `PickupEffect::exit` when the clock runs out

use glam::Vec2;
use hecs::{Entity, World};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::effects::{
    BounceEffect, EffectContext, ExpandEffect, GiantBallEffect, SlowEffect, SparkleEffect,
};
use crate::geometry::{overlap, Rect};
use crate::hooks::AudioHooks;
use crate::{Ball, Config, GameRng, PickupItem};

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickupKind {
    Sparkle,
    Expand,
    Slow,
    Bounce,
    GiantBall,
}

/// What a repeat pickup of an already-active kind does to its clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StackPolicy {
    /// One clock per kind, restarted at now + duration
    #[default]
    Reset,
    /// One clock per kind, pushed back by another duration
    Extend,
    /// Every pickup runs its own clock
    Independent,
}

/// Side effects of a pickup kind. Both hooks default to doing nothing.
pub trait PickupEffect {
    fn enter(&mut self, _ctx: &mut EffectContext<'_>) {}
    fn exit(&mut self, _ctx: &mut EffectContext<'_>) {}
}

/// A kind with no gameplay effect
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEffect;

impl PickupEffect for NoEffect {}

/// Colour plus the effect hooks for one kind
pub struct PickupType {
    pub colour: u8,
    pub effect: Box<dyn PickupEffect>,
}

impl PickupType {
    pub fn new(colour: u8, effect: impl PickupEffect + 'static) -> Self {
        Self {
            colour,
            effect: Box::new(effect),
        }
    }
}

/// Ordered mapping from kind to its type, built once at match setup
#[derive(Default)]
pub struct PickupRegistry {
    types: Vec<(PickupKind, PickupType)>,
}

impl PickupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All five kinds with their standard effects
    pub fn standard(config: &Config) -> Self {
        Self::new()
            .with(PickupKind::Sparkle, PickupType::new(10, SparkleEffect))
            .with(
                PickupKind::Expand,
                PickupType::new(config.expand_colour, ExpandEffect::default()),
            )
            .with(
                PickupKind::Slow,
                PickupType::new(config.slow_colour, SlowEffect::default()),
            )
            .with(PickupKind::Bounce, PickupType::new(9, BounceEffect))
            .with(PickupKind::GiantBall, PickupType::new(14, GiantBallEffect))
    }

    /// Register a kind, replacing any earlier registration in place
    pub fn with(mut self, kind: PickupKind, pickup_type: PickupType) -> Self {
        match self.types.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, existing)) => *existing = pickup_type,
            None => self.types.push((kind, pickup_type)),
        }
        self
    }

    pub fn kinds(&self) -> impl Iterator<Item = PickupKind> + '_ {
        self.types.iter().map(|(kind, _)| *kind)
    }

    pub fn colour(&self, kind: PickupKind) -> Option<u8> {
        self.get(kind).map(|t| t.colour)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn get(&self, kind: PickupKind) -> Option<&PickupType> {
        self.types.iter().find(|(k, _)| *k == kind).map(|(_, t)| t)
    }

    fn get_mut(&mut self, kind: PickupKind) -> Option<&mut PickupType> {
        self.types
            .iter_mut()
            .find(|(k, _)| *k == kind)
            .map(|(_, t)| t)
    }
}

/// A running effect clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveCondition {
    pub kind: PickupKind,
    /// Last tick on which the condition is still active
    pub deadline: u64,
    /// Enter calls this clock owes an exit for
    pub activations: u32,
}

/// Tracks spawned pickups and the conditions they have switched on
pub struct PickupManager {
    registry: PickupRegistry,
    active: Vec<ActiveCondition>,
    next_spawn: u64,
    interval: (u64, u64),
    field: Rect,
    size: f32,
    duration: u64,
    policy: StackPolicy,
}

impl PickupManager {
    pub fn new(registry: PickupRegistry, config: &Config, now: u64, rng: &mut GameRng) -> Self {
        let interval = (config.pickup_interval_min, config.pickup_interval_max);
        Self {
            registry,
            active: Vec::new(),
            next_spawn: now + rng.range_u64(interval.0, interval.1),
            interval,
            field: config.pickup_field(),
            size: config.pickup_size,
            duration: config.pickup_duration,
            policy: config.stack_policy,
        }
    }

    /// Spawn a pickup when one is due, then end every expired condition
    pub fn check_pickup(&mut self, now: u64, ctx: &mut EffectContext<'_>, rng: &mut GameRng) {
        if now > self.next_spawn {
            self.create_pickup(ctx.world, rng);
            self.next_spawn = now + rng.range_u64(self.interval.0, self.interval.1);
        }

        let (expired, live): (Vec<_>, Vec<_>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(|c| now > c.deadline);
        self.active = live;

        for condition in expired {
            debug!("{:?} expired at tick {}", condition.kind, now);
            if let Some(pickup_type) = self.registry.get_mut(condition.kind) {
                for _ in 0..condition.activations {
                    pickup_type.effect.exit(ctx);
                }
            }
        }
    }

    /// End every running condition now, owed exits included, and schedule
    /// the next spawn from `now`. Used when a match restarts.
    pub fn reset(&mut self, now: u64, ctx: &mut EffectContext<'_>, rng: &mut GameRng) {
        for condition in std::mem::take(&mut self.active) {
            if let Some(pickup_type) = self.registry.get_mut(condition.kind) {
                for _ in 0..condition.activations {
                    pickup_type.effect.exit(ctx);
                }
            }
        }
        self.next_spawn = now + rng.range_u64(self.interval.0, self.interval.1);
    }

    /// Place a random kind at a random spot inside the pickup field
    pub fn create_pickup(&mut self, world: &mut World, rng: &mut GameRng) -> Option<Entity> {
        if self.registry.is_empty() {
            return None;
        }
        let pos = Vec2::new(
            rng.range_f32(self.field.left(), self.field.right() - self.size),
            rng.range_f32(self.field.top(), self.field.bottom() - self.size),
        );
        let kind = self.registry.types[rng.index(self.registry.len())].0;
        debug!("Spawned {:?} pickup at ({:.1}, {:.1})", kind, pos.x, pos.y);
        Some(world.spawn((PickupItem {
            kind,
            pos,
            size: Vec2::splat(self.size),
        },)))
    }

    /// Collect at most one pickup the ball is touching
    pub fn check_collision(
        &mut self,
        now: u64,
        ball: &Ball,
        ctx: &mut EffectContext<'_>,
        audio: &mut impl AudioHooks,
    ) -> Option<PickupKind> {
        let (entity, item) = Self::items(ctx.world)
            .into_iter()
            .find(|(_, item)| overlap(item, ball))?;

        ctx.world
            .despawn(entity)
            .expect("pickup entity just queried");
        audio.on_pickup();
        self.activate(item.kind, now);
        debug!("Picked up {:?} at tick {}", item.kind, now);

        if let Some(pickup_type) = self.registry.get_mut(item.kind) {
            pickup_type.effect.enter(ctx);
        }
        Some(item.kind)
    }

    fn activate(&mut self, kind: PickupKind, now: u64) {
        if self.policy != StackPolicy::Independent {
            if let Some(condition) = self.active.iter_mut().find(|c| c.kind == kind) {
                condition.deadline = match self.policy {
                    StackPolicy::Extend => condition.deadline + self.duration,
                    _ => now + self.duration,
                };
                condition.activations += 1;
                trace!(
                    "{:?} x{} active until tick {}",
                    kind,
                    condition.activations,
                    condition.deadline
                );
                return;
            }
        }
        self.active.push(ActiveCondition {
            kind,
            deadline: now + self.duration,
            activations: 1,
        });
        trace!("{:?} active until tick {}", kind, now + self.duration);
    }

    pub fn is_condition_active(&self, kind: PickupKind) -> bool {
        self.active.iter().any(|c| c.kind == kind)
    }

    /// Latest tick on which `kind` is still active.
    ///
    /// # Panics
    /// If `kind` is not active; callers check `is_condition_active` first.
    pub fn deadline(&self, kind: PickupKind) -> u64 {
        self.active
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.deadline)
            .max()
            .unwrap_or_else(|| panic!("no active condition for {:?}", kind))
    }

    pub fn active_conditions(&self) -> &[ActiveCondition] {
        &self.active
    }

    pub fn next_spawn(&self) -> u64 {
        self.next_spawn
    }

    pub fn registry(&self) -> &PickupRegistry {
        &self.registry
    }

    /// Pickups on the board in a stable order
    pub fn items(world: &World) -> Vec<(Entity, PickupItem)> {
        let mut items: Vec<_> = world
            .query::<&PickupItem>()
            .iter()
            .map(|(e, item)| (e, *item))
            .collect();
        items.sort_by_key(|(e, _)| e.id());
        items
    }
}
