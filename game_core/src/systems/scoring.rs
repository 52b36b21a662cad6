use crate::{Ball, Config, Events, GameRng, Score, Side};
use hecs::World;
use log::debug;

/// Tally a point for `scorer`; returns the winner once the match is decided.
///
/// The ball is re-served only while the match goes on, so a finished match
/// leaves it where it went out.
pub fn check_scoring(
    world: &mut World,
    scorer: Side,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
    config: &Config,
) -> Option<Side> {
    score.increment(scorer);
    events.scored(scorer);
    debug!("{:?} scores ({}-{})", scorer, score.left, score.right);

    if let Some(winner) = score.has_winner(config.win_score) {
        events.finished = true;
        return Some(winner);
    }

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.reset(rng);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_ball;
    use glam::Vec2;

    fn setup_world() -> (World, Config, Score, Events, GameRng) {
        let world = World::new();
        let config = Config::new();
        let score = Score::new();
        let events = Events::new();
        let rng = GameRng::new(12345); // Fixed seed for deterministic tests
        (world, config, score, events, rng)
    }

    #[test]
    fn test_right_player_scores() {
        let (mut world, config, mut score, mut events, mut rng) = setup_world();
        create_ball(&mut world, &config, &mut rng);

        let winner = check_scoring(
            &mut world,
            Side::Right,
            &mut score,
            &mut events,
            &mut rng,
            &config,
        );

        assert_eq!(winner, None);
        assert_eq!(score.right, 1, "Right player should score");
        assert_eq!(score.left, 0, "Left player should not score");
        assert!(events.right_scored, "Should trigger right_scored event");
    }

    #[test]
    fn test_ball_resets_after_scoring() {
        let (mut world, config, mut score, mut events, mut rng) = setup_world();
        let ball = create_ball(&mut world, &config, &mut rng);
        world.get::<&mut Ball>(ball).unwrap().pos = Vec2::new(-0.3, 12.0);

        check_scoring(
            &mut world,
            Side::Right,
            &mut score,
            &mut events,
            &mut rng,
            &config,
        );

        let b = world.get::<&Ball>(ball).unwrap();
        assert_eq!(b.pos, config.ball_start(), "Ball should reset to centre after scoring");
        assert_eq!(b.vel.x.abs(), config.ball_speed);
        assert_eq!(b.vel.y.abs(), config.ball_speed);
    }

    #[test]
    fn test_winning_point_leaves_ball_in_place() {
        let (mut world, config, mut score, mut events, mut rng) = setup_world();
        let ball = create_ball(&mut world, &config, &mut rng);
        let out = Vec2::new(config.board_width + 0.2, 12.0);
        world.get::<&mut Ball>(ball).unwrap().pos = out;
        score.left = config.win_score - 1;

        let winner = check_scoring(
            &mut world,
            Side::Left,
            &mut score,
            &mut events,
            &mut rng,
            &config,
        );

        assert_eq!(winner, Some(Side::Left));
        assert!(events.finished);
        assert!(events.left_scored);
        assert_eq!(world.get::<&Ball>(ball).unwrap().pos, out);
    }

    #[test]
    fn test_multiple_scores_accumulate() {
        let (mut world, config, mut score, mut events, mut rng) = setup_world();
        create_ball(&mut world, &config, &mut rng);

        check_scoring(
            &mut world,
            Side::Left,
            &mut score,
            &mut events,
            &mut rng,
            &config,
        );
        events.clear();
        check_scoring(
            &mut world,
            Side::Left,
            &mut score,
            &mut events,
            &mut rng,
            &config,
        );

        assert_eq!(score.left, 2, "Scores should accumulate");
        assert_eq!(score.right, 0);
    }
}
