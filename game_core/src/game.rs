//! Match controller: owns the world and runs one tick of play per `step`.
//!
//! Tick order while the match is live:
//! 1. paddles read input
//! 2. serving countdown (ball and pickups stay frozen until it runs out)
//! 3. ball moves; a point ends the tick
//! 4. periodic speed-up
//! 5. paddle collisions
//! 6. pickup spawn/expiry, then pickup collection
//! 7. sparkle trail

use hecs::{Entity, World};
use log::{debug, info};

use crate::effects::EffectContext;
use crate::error::ConfigError;
use crate::geometry::Collider;
use crate::hooks::{AudioHooks, InputSource};
use crate::pickups::{PickupKind, PickupManager, PickupRegistry};
use crate::systems::*;
use crate::{
    create_ball, create_paddle, Ball, Config, Events, GameRng, Paddle, Particle, ParticleEmitter,
    PickupItem, Score, ServeTimer, Side, Time,
};

/// Match lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// Ball held at centre until the serve delay runs out
    Serving,
    /// Ball in play
    Active,
    /// Someone reached the winning score; only a restart leaves this state
    Finished,
}

pub struct Game {
    world: World,
    config: Config,
    rng: GameRng,
    score: Score,
    events: Events,
    serve: ServeTimer,
    next_speedup: u64,
    state: MatchState,
    pickups: PickupManager,
    emitter: ParticleEmitter,
    ball: Entity,
    paddles: [Entity; 2], // left, right
    music_pending: bool,
}

impl Game {
    /// A match with every standard pickup kind
    pub fn new(config: Config, seed: u64, time: &Time) -> Result<Self, ConfigError> {
        let registry = PickupRegistry::standard(&config);
        Self::with_registry(config, registry, seed, time)
    }

    pub fn with_registry(
        config: Config,
        registry: PickupRegistry,
        seed: u64,
        time: &Time,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = GameRng::new(seed);
        let mut world = World::new();
        let paddles = [
            create_paddle(&mut world, Side::Left, &config),
            create_paddle(&mut world, Side::Right, &config),
        ];
        let ball = create_ball(&mut world, &config, &mut rng);
        let pickups = PickupManager::new(registry, &config, time.now, &mut rng);
        let emitter = ParticleEmitter::new(&config);
        let mut serve = ServeTimer::new();
        serve.start_delay(time.now, config.serve_delay);

        info!(
            "Match started at tick {} (first to {}, {} pickup kinds)",
            time.now,
            config.win_score,
            pickups.registry().len()
        );

        Ok(Self {
            world,
            config,
            rng,
            score: Score::new(),
            events: Events::new(),
            serve,
            next_speedup: time.now,
            state: MatchState::Serving,
            pickups,
            emitter,
            ball,
            paddles,
            music_pending: true,
        })
    }

    /// Start over: zero scores, fresh paddles and ball, no running effects
    pub fn restart(&mut self, time: &Time) {
        let now = time.now;
        let mut ctx = EffectContext {
            world: &mut self.world,
            emitter: &mut self.emitter,
            ball: self.ball,
            paddles: self.paddles,
            config: &self.config,
        };
        self.pickups.reset(now, &mut ctx, &mut self.rng);

        self.world.clear();
        self.paddles = [
            create_paddle(&mut self.world, Side::Left, &self.config),
            create_paddle(&mut self.world, Side::Right, &self.config),
        ];
        self.ball = create_ball(&mut self.world, &self.config, &mut self.rng);
        self.emitter.clear();
        self.score = Score::new();
        self.events.clear();
        self.serve.start_delay(now, self.config.serve_delay);
        self.state = MatchState::Serving;
        self.music_pending = true;

        info!("Match restarted at tick {}", now);
    }

    /// Advance the match by one tick
    pub fn step(
        &mut self,
        time: &Time,
        input: &impl InputSource,
        audio: &mut impl AudioHooks,
    ) -> &Events {
        let now = time.now;
        self.events.clear();

        if self.music_pending {
            self.music_pending = false;
            audio.start_music();
        }

        if self.state == MatchState::Finished {
            return &self.events;
        }

        // 1. Paddles
        move_paddles(&mut self.world, input);
        self.emitter.expire(now);

        // 2. Serve countdown
        if self.state == MatchState::Serving {
            if !self.serve.can_serve(now) {
                return &self.events;
            }
            self.state = MatchState::Active;
            self.next_speedup = now + self.config.speedup_period;
            debug!("Ball served at tick {}", now);
        }

        // 3. Ball
        if let Some(scorer) = move_ball(&mut self.world, &mut self.events) {
            self.score_point(scorer, now, audio);
            return &self.events;
        }

        // 4. Speed-up
        if now >= self.next_speedup {
            speed_up(&mut self.world, self.config.speedup_amount);
            self.next_speedup += self.config.speedup_period;
        }

        // 5. Paddles vs ball
        if check_paddle_collisions(&mut self.world, &self.paddles, &mut self.events) {
            audio.on_hit();
        }

        // 6. Pickups
        let mut ctx = EffectContext {
            world: &mut self.world,
            emitter: &mut self.emitter,
            ball: self.ball,
            paddles: self.paddles,
            config: &self.config,
        };
        self.pickups.check_pickup(now, &mut ctx, &mut self.rng);
        let ball = *ctx.ball_mut();
        self.events.pickup_taken = self.pickups.check_collision(now, &ball, &mut ctx, audio);

        // 7. Sparkles
        let center = self.ball().rect().center();
        self.emitter.sparkle(now, center, &mut self.rng);

        &self.events
    }

    fn score_point(&mut self, scorer: Side, now: u64, audio: &mut impl AudioHooks) {
        let winner = check_scoring(
            &mut self.world,
            scorer,
            &mut self.score,
            &mut self.events,
            &mut self.rng,
            &self.config,
        );
        audio.on_score();

        match winner {
            Some(winner) => {
                self.state = MatchState::Finished;
                audio.stop_music();
                audio.on_finish();
                info!(
                    "{:?} wins {}-{} at tick {}",
                    winner, self.score.left, self.score.right, now
                );
            }
            None => {
                self.state = MatchState::Serving;
                self.serve.start_delay(now, self.config.serve_delay);
            }
        }
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == MatchState::Finished
    }

    pub fn winner(&self) -> Option<Side> {
        self.score.has_winner(self.config.win_score)
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Events from the most recent step
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn ball(&self) -> Ball {
        *self
            .world
            .get::<&Ball>(self.ball)
            .unwrap_or_else(|e| panic!("ball missing from world: {}", e))
    }

    pub fn ball_mut(&mut self) -> &mut Ball {
        self.world
            .query_one_mut::<&mut Ball>(self.ball)
            .unwrap_or_else(|e| panic!("ball missing from world: {}", e))
    }

    pub fn paddle(&self, side: Side) -> Paddle {
        let entity = self.paddle_entity(side);
        *self
            .world
            .get::<&Paddle>(entity)
            .unwrap_or_else(|e| panic!("{:?} paddle missing from world: {}", side, e))
    }

    pub fn paddle_entity(&self, side: Side) -> Entity {
        match side {
            Side::Left => self.paddles[0],
            Side::Right => self.paddles[1],
        }
    }

    /// Pickups on the board with their colours
    pub fn pickup_items(&self) -> Vec<(PickupItem, u8)> {
        PickupManager::items(&self.world)
            .into_iter()
            .filter_map(|(_, item)| {
                let colour = self.pickups.registry().colour(item.kind)?;
                Some((item, colour))
            })
            .collect()
    }

    pub fn pickups(&self) -> &PickupManager {
        &self.pickups
    }

    pub fn is_condition_active(&self, kind: PickupKind) -> bool {
        self.pickups.is_condition_active(kind)
    }

    /// Spawn a pickup right away, outside the usual schedule
    pub fn spawn_pickup(&mut self) -> Option<Entity> {
        self.pickups.create_pickup(&mut self.world, &mut self.rng)
    }

    pub fn particles(&self) -> &[Particle] {
        self.emitter.particles()
    }

    /// Draw live particles, dropping expired ones
    pub fn display_particles(&mut self, time: &Time, draw: impl FnMut(&Particle)) {
        self.emitter.display(time.now, draw);
    }
}
