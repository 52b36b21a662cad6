//! Standard pickup effects.
//!
//! Paddle modifiers (expand, slow) remember which paddle each activation hit
//! in an `EffectStack`, so two overlapping pickups on the same paddle revert
//! it only once the second one has run out.

use std::collections::VecDeque;

use hecs::{Entity, World};
use log::trace;

use crate::pickups::PickupEffect;
use crate::{Ball, Config, Paddle, ParticleEmitter};

/// Everything a pickup effect may touch while it runs
pub struct EffectContext<'a> {
    pub world: &'a mut World,
    pub emitter: &'a mut ParticleEmitter,
    pub ball: Entity,
    pub paddles: [Entity; 2], // left, right
    pub config: &'a Config,
}

impl EffectContext<'_> {
    pub fn ball_mut(&mut self) -> &mut Ball {
        let ball = self.ball;
        self.world
            .query_one_mut::<&mut Ball>(ball)
            .unwrap_or_else(|e| panic!("ball {:?} missing from world: {}", ball, e))
    }

    pub fn paddle_mut(&mut self, entity: Entity) -> &mut Paddle {
        self.world
            .query_one_mut::<&mut Paddle>(entity)
            .unwrap_or_else(|e| panic!("paddle {:?} missing from world: {}", entity, e))
    }

    /// Paddle on the side the ball is travelling towards
    pub fn heading_paddle(&mut self) -> Entity {
        if self.ball_mut().vel.x >= 0.0 {
            self.paddles[1]
        } else {
            self.paddles[0]
        }
    }
}

/// Paddles affected by overlapping activations of one effect, oldest first
#[derive(Debug, Clone, Default)]
pub struct EffectStack {
    entries: VecDeque<Entity>,
}

impl EffectStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, paddle: Entity) {
        self.entries.push_back(paddle);
    }

    /// Remove the oldest entry.
    ///
    /// # Panics
    /// If the stack is empty: an exit ran without a matching enter.
    pub fn pop_oldest(&mut self) -> Entity {
        self.entries
            .pop_front()
            .expect("effect exit without matching enter")
    }

    pub fn contains(&self, paddle: Entity) -> bool {
        self.entries.contains(&paddle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sparkle trail behind the ball
#[derive(Debug, Clone, Copy, Default)]
pub struct SparkleEffect;

impl PickupEffect for SparkleEffect {
    fn enter(&mut self, ctx: &mut EffectContext<'_>) {
        ctx.emitter.turn_on();
    }

    fn exit(&mut self, ctx: &mut EffectContext<'_>) {
        ctx.emitter.turn_off();
    }
}

/// Gravity on the ball
#[derive(Debug, Clone, Copy, Default)]
pub struct BounceEffect;

impl PickupEffect for BounceEffect {
    fn enter(&mut self, ctx: &mut EffectContext<'_>) {
        ctx.ball_mut().bounce_on();
    }

    fn exit(&mut self, ctx: &mut EffectContext<'_>) {
        ctx.ball_mut().bounce_off();
    }
}

/// Bigger ball
#[derive(Debug, Clone, Copy, Default)]
pub struct GiantBallEffect;

impl PickupEffect for GiantBallEffect {
    fn enter(&mut self, ctx: &mut EffectContext<'_>) {
        ctx.ball_mut().giant_on();
    }

    fn exit(&mut self, ctx: &mut EffectContext<'_>) {
        ctx.ball_mut().giant_off();
    }
}

/// Colour for a paddle once one modifier has been reverted, so a modifier
/// still in force keeps showing
fn remaining_colour(paddle: &Paddle, config: &Config) -> u8 {
    if paddle.move_speed != config.paddle_speed {
        config.slow_colour
    } else if paddle.size.y != config.paddle_height {
        config.expand_colour
    } else {
        config.paddle_colour
    }
}

/// Taller paddle for whoever the ball is heading towards
#[derive(Debug, Clone, Default)]
pub struct ExpandEffect {
    pub stack: EffectStack,
}

impl PickupEffect for ExpandEffect {
    fn enter(&mut self, ctx: &mut EffectContext<'_>) {
        let target = ctx.heading_paddle();
        self.stack.push(target);
        let (height, colour) = (ctx.config.expand_height, ctx.config.expand_colour);
        let paddle = ctx.paddle_mut(target);
        paddle.set_height(height);
        paddle.colour = colour;
        trace!("Expanded {:?} paddle ({} stacked)", paddle.side, self.stack.len());
    }

    fn exit(&mut self, ctx: &mut EffectContext<'_>) {
        let target = self.stack.pop_oldest();
        if self.stack.contains(target) {
            return;
        }
        let (height, config) = (ctx.config.paddle_height, ctx.config);
        let paddle = ctx.paddle_mut(target);
        paddle.set_height(height);
        paddle.colour = remaining_colour(paddle, config);
        trace!("Restored {:?} paddle height", paddle.side);
    }
}

/// Slower paddle for whoever the ball is heading towards
#[derive(Debug, Clone, Default)]
pub struct SlowEffect {
    pub stack: EffectStack,
}

impl PickupEffect for SlowEffect {
    fn enter(&mut self, ctx: &mut EffectContext<'_>) {
        let target = ctx.heading_paddle();
        self.stack.push(target);
        let speed = ctx.config.paddle_speed * ctx.config.slow_factor;
        let colour = ctx.config.slow_colour;
        let paddle = ctx.paddle_mut(target);
        paddle.move_speed = speed;
        paddle.colour = colour;
        trace!("Slowed {:?} paddle ({} stacked)", paddle.side, self.stack.len());
    }

    fn exit(&mut self, ctx: &mut EffectContext<'_>) {
        let target = self.stack.pop_oldest();
        if self.stack.contains(target) {
            return;
        }
        let (speed, config) = (ctx.config.paddle_speed, ctx.config);
        let paddle = ctx.paddle_mut(target);
        paddle.move_speed = speed;
        paddle.colour = remaining_colour(paddle, config);
        trace!("Restored {:?} paddle speed", paddle.side);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameRng, Side};
    use glam::Vec2;

    struct Fixture {
        world: World,
        emitter: ParticleEmitter,
        config: Config,
        ball: Entity,
        paddles: [Entity; 2],
    }

    impl Fixture {
        fn new() -> Self {
            let config = Config::new();
            let mut world = World::new();
            let mut rng = GameRng::new(12345);
            let ball = world.spawn((Ball::new(&config, &mut rng),));
            let paddles = [
                world.spawn((Paddle::new(Side::Left, &config),)),
                world.spawn((Paddle::new(Side::Right, &config),)),
            ];
            Self {
                world,
                emitter: ParticleEmitter::new(&config),
                config,
                ball,
                paddles,
            }
        }

        fn ctx(&mut self) -> EffectContext<'_> {
            EffectContext {
                world: &mut self.world,
                emitter: &mut self.emitter,
                ball: self.ball,
                paddles: self.paddles,
                config: &self.config,
            }
        }

        fn set_ball_vel(&mut self, vel: Vec2) {
            self.ctx().ball_mut().vel = vel;
        }

        fn paddle(&self, side: Side) -> Paddle {
            let entity = match side {
                Side::Left => self.paddles[0],
                Side::Right => self.paddles[1],
            };
            *self.world.get::<&Paddle>(entity).expect("paddle")
        }

        fn ball(&self) -> Ball {
            *self.world.get::<&Ball>(self.ball).expect("ball")
        }
    }

    #[test]
    fn test_heading_paddle_follows_ball_direction() {
        let mut fixture = Fixture::new();
        fixture.set_ball_vel(Vec2::new(0.5, 0.5));
        let target = fixture.ctx().heading_paddle();
        assert_eq!(target, fixture.paddles[1]);

        fixture.set_ball_vel(Vec2::new(-0.5, 0.5));
        let target = fixture.ctx().heading_paddle();
        assert_eq!(target, fixture.paddles[0]);
    }

    #[test]
    fn test_expand_overlap_reverts_only_after_last_exit() {
        let mut fixture = Fixture::new();
        let mut effect = ExpandEffect::default();
        fixture.set_ball_vel(Vec2::new(-0.5, 0.5));

        effect.enter(&mut fixture.ctx());
        effect.enter(&mut fixture.ctx());
        assert_eq!(fixture.paddle(Side::Left).size.y, fixture.config.expand_height);

        effect.exit(&mut fixture.ctx());
        assert_eq!(
            fixture.paddle(Side::Left).size.y,
            fixture.config.expand_height,
            "Still expanded while the second pickup runs"
        );

        effect.exit(&mut fixture.ctx());
        let paddle = fixture.paddle(Side::Left);
        assert_eq!(paddle.size.y, fixture.config.paddle_height);
        assert_eq!(paddle.colour, fixture.config.paddle_colour);
        assert!(effect.stack.is_empty());
    }

    #[test]
    fn test_expand_on_different_paddles_reverts_each() {
        let mut fixture = Fixture::new();
        let mut effect = ExpandEffect::default();

        fixture.set_ball_vel(Vec2::new(0.5, 0.0));
        effect.enter(&mut fixture.ctx());
        fixture.set_ball_vel(Vec2::new(-0.5, 0.0));
        effect.enter(&mut fixture.ctx());

        // Oldest first: the right paddle was expanded first
        effect.exit(&mut fixture.ctx());
        assert_eq!(fixture.paddle(Side::Right).size.y, fixture.config.paddle_height);
        assert_eq!(fixture.paddle(Side::Left).size.y, fixture.config.expand_height);

        effect.exit(&mut fixture.ctx());
        assert_eq!(fixture.paddle(Side::Left).size.y, fixture.config.paddle_height);
    }

    #[test]
    fn test_slow_overlap_reverts_only_after_last_exit() {
        let mut fixture = Fixture::new();
        let mut effect = SlowEffect::default();
        fixture.set_ball_vel(Vec2::new(0.5, -0.5));
        let slowed = fixture.config.paddle_speed * fixture.config.slow_factor;

        effect.enter(&mut fixture.ctx());
        assert_eq!(fixture.paddle(Side::Right).move_speed, slowed);
        assert_eq!(fixture.paddle(Side::Right).colour, fixture.config.slow_colour);
        assert_eq!(fixture.paddle(Side::Left).move_speed, fixture.config.paddle_speed);

        effect.enter(&mut fixture.ctx());
        effect.exit(&mut fixture.ctx());
        assert_eq!(fixture.paddle(Side::Right).move_speed, slowed);

        effect.exit(&mut fixture.ctx());
        assert_eq!(fixture.paddle(Side::Right).move_speed, fixture.config.paddle_speed);
    }

    #[test]
    fn test_expand_exit_keeps_slow_colour() {
        let mut fixture = Fixture::new();
        let mut expand = ExpandEffect::default();
        let mut slow = SlowEffect::default();
        fixture.set_ball_vel(Vec2::new(0.5, 0.0));

        slow.enter(&mut fixture.ctx());
        expand.enter(&mut fixture.ctx());
        assert_eq!(fixture.paddle(Side::Right).colour, fixture.config.expand_colour);

        expand.exit(&mut fixture.ctx());
        let paddle = fixture.paddle(Side::Right);
        assert_eq!(paddle.size.y, fixture.config.paddle_height);
        assert_eq!(paddle.colour, fixture.config.slow_colour, "Still slowed");

        slow.exit(&mut fixture.ctx());
        assert_eq!(fixture.paddle(Side::Right).colour, fixture.config.paddle_colour);
    }

    #[test]
    fn test_slow_exit_keeps_expand_colour() {
        let mut fixture = Fixture::new();
        let mut expand = ExpandEffect::default();
        let mut slow = SlowEffect::default();
        fixture.set_ball_vel(Vec2::new(-0.5, 0.0));

        expand.enter(&mut fixture.ctx());
        slow.enter(&mut fixture.ctx());
        slow.exit(&mut fixture.ctx());

        let paddle = fixture.paddle(Side::Left);
        assert_eq!(paddle.move_speed, fixture.config.paddle_speed);
        assert_eq!(paddle.colour, fixture.config.expand_colour, "Still expanded");

        expand.exit(&mut fixture.ctx());
        assert_eq!(fixture.paddle(Side::Left).colour, fixture.config.paddle_colour);
    }

    #[test]
    #[should_panic(expected = "without matching enter")]
    fn test_exit_without_enter_panics() {
        let mut fixture = Fixture::new();
        SlowEffect::default().exit(&mut fixture.ctx());
    }

    #[test]
    fn test_sparkle_toggles_emitter() {
        let mut fixture = Fixture::new();
        let mut effect = SparkleEffect;

        effect.enter(&mut fixture.ctx());
        assert!(fixture.emitter.is_on());
        effect.exit(&mut fixture.ctx());
        assert!(!fixture.emitter.is_on());
    }

    #[test]
    fn test_bounce_and_giant_toggle_ball() {
        let mut fixture = Fixture::new();
        let base = fixture.ball();

        BounceEffect.enter(&mut fixture.ctx());
        GiantBallEffect.enter(&mut fixture.ctx());
        let ball = fixture.ball();
        assert_eq!(ball.bounce_status, 1);
        assert_eq!(ball.size_status, 1);
        assert!(ball.size.x > base.size.x);

        BounceEffect.exit(&mut fixture.ctx());
        GiantBallEffect.exit(&mut fixture.ctx());
        let ball = fixture.ball();
        assert_eq!(ball.bounce_status, 0);
        assert_eq!(ball.size, base.size);
        assert_eq!(ball.pos, base.pos);
    }

    #[test]
    fn test_effect_stack_order() {
        let mut world = World::new();
        let a = world.spawn((1u8,));
        let b = world.spawn((2u8,));
        let mut stack = EffectStack::new();

        stack.push(a);
        stack.push(b);
        stack.push(a);
        assert_eq!(stack.pop_oldest(), a);
        assert!(stack.contains(a), "Second push of a remains");
        assert_eq!(stack.pop_oldest(), b);
        assert_eq!(stack.len(), 1);
    }
}
