//! Per-frame simulation step and the game state machine
//!
//! Idle -> Running (start) -> Paused (toggle, Running only) -> Running ->
//! GameOver (fatal collision) -> Running (restart via full reset). The tick
//! gates every system on the phase; nothing simulates outside Running.

use glam::Vec2;

use super::collision::{self, CollisionOutcome};
use super::state::{GameEvent, GamePhase, GameSession};
use super::{motion, score, spawn};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held movement direction, each axis in [-1, 1]
    pub movement: Vec2,
    /// Barrel-roll command: -1.0 left, +1.0 right
    pub roll: Option<f32>,
    /// Pause toggle (edge-triggered)
    pub pause: bool,
    /// Start action from the instructions screen
    pub start: bool,
    /// Restart action from the game-over screen
    pub restart: bool,
}

/// Advance the session by one timestep.
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    // Start and restart both mean "begin a fresh run" from their gate states
    if (input.start && session.phase == GamePhase::Idle)
        || (input.restart && session.phase == GamePhase::GameOver)
    {
        session.reset_run();
        session.phase = GamePhase::Running;
        log::info!("run started (high score to beat: {})", session.high_score);
    }

    // Pause only toggles between Running and Paused
    if input.pause {
        match session.phase {
            GamePhase::Running => session.phase = GamePhase::Paused,
            GamePhase::Paused => session.phase = GamePhase::Running,
            _ => {}
        }
    }

    if session.phase != GamePhase::Running {
        return;
    }

    session.player.set_input(input.movement);
    if let Some(direction) = input.roll {
        session.player.barrel_roll(direction);
    }
    session.player.update(dt, &mut session.events);

    spawn::update(session, dt);
    motion::update(session, dt);

    if collision::update(session) == CollisionOutcome::Fatal {
        // The fatal hit ends the frame; no accrual, no further processing
        game_over(session);
        return;
    }

    score::update(session, dt);
}

fn game_over(session: &mut GameSession) {
    session.phase = GamePhase::GameOver;
    session.push_event(GameEvent::Explosion {
        pos: session.player.pos.to_array(),
    });

    let final_score = session.score.floor() as u32;
    if final_score > session.high_score {
        session.high_score = final_score;
        session.push_event(GameEvent::NewHighScore { value: final_score });
    }
    session.push_event(GameEvent::GameOver { final_score });
    log::info!("game over at {final_score}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{MotionPattern, Obstacle};
    use glam::Vec3;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 120.0;

    fn started() -> GameSession {
        let mut session = GameSession::new(11);
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut session, &input, DT);
        session
    }

    fn plant_fatal_obstacle(session: &mut GameSession) {
        let id = session.next_entity_id();
        session.obstacles.push(Obstacle {
            id,
            pos: session.player.pos + Vec3::new(0.0, 0.0, -0.4),
            speed: 0.0,
            pattern: MotionPattern::Static,
            age: 0.0,
        });
    }

    #[test]
    fn test_idle_does_not_simulate() {
        let mut session = GameSession::new(11);
        tick(&mut session, &TickInput::default(), DT);
        assert_eq!(session.phase, GamePhase::Idle);
        assert_eq!(session.score, 0.0);
        assert!(session.obstacles.is_empty());
    }

    #[test]
    fn test_start_begins_running_and_accrues() {
        let mut session = started();
        assert_eq!(session.phase, GamePhase::Running);
        assert!(session.score > 0.0);

        tick(&mut session, &TickInput::default(), DT);
        assert!((session.score - 2.0 * DT * SCORE_RATE).abs() < 1e-5);
    }

    #[test]
    fn test_pause_toggle_only_from_running() {
        let mut session = GameSession::new(11);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        // No-op from Idle
        tick(&mut session, &pause, DT);
        assert_eq!(session.phase, GamePhase::Idle);

        let mut session = started();
        let score_before = session.score;
        tick(&mut session, &pause, DT);
        assert_eq!(session.phase, GamePhase::Paused);
        // Paused frames freeze the world
        assert_eq!(session.score, score_before);

        tick(&mut session, &pause, DT);
        assert_eq!(session.phase, GamePhase::Running);
        assert!(session.score > score_before);
    }

    #[test]
    fn test_speed_invariant_holds_every_frame() {
        let mut session = started();
        for _ in 0..600 {
            tick(&mut session, &TickInput::default(), DT);
            let expected = session.base_speed + (session.score / 1000.0) * 0.1;
            assert_eq!(session.game_speed, expected);
        }
    }

    #[test]
    fn test_fatal_collision_ends_run_and_aborts_frame() {
        let mut session = started();
        let score_before = session.score;
        plant_fatal_obstacle(&mut session);

        tick(&mut session, &TickInput::default(), DT);
        assert_eq!(session.phase, GamePhase::GameOver);
        // The fatal frame accrues nothing
        assert_eq!(session.score, score_before);
        assert!(
            session
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }))
        );

        // Terminal until restart: further ticks change nothing
        let events_len = session.events.len();
        tick(&mut session, &TickInput::default(), DT);
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(session.events.len(), events_len);
    }

    #[test]
    fn test_game_over_emitted_once() {
        let mut session = started();
        plant_fatal_obstacle(&mut session);
        for _ in 0..5 {
            tick(&mut session, &TickInput::default(), DT);
        }
        let count = session
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_high_score_updates_only_on_beat() {
        let mut session = started();
        session.score = 250.7;
        session.high_score = 100;
        plant_fatal_obstacle(&mut session);
        tick(&mut session, &TickInput::default(), DT);
        assert_eq!(session.high_score, 250);
        assert!(
            session
                .events
                .contains(&GameEvent::NewHighScore { value: 250 })
        );

        // Second run ends below the record; high score unchanged
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut session, &restart, DT);
        assert_eq!(session.phase, GamePhase::Running);
        plant_fatal_obstacle(&mut session);
        tick(&mut session, &TickInput::default(), DT);
        assert_eq!(session.high_score, 250);
        assert!(
            !session
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
        );
    }

    #[test]
    fn test_restart_resets_run_state() {
        let mut session = started();
        for _ in 0..240 {
            tick(&mut session, &TickInput::default(), DT);
        }
        plant_fatal_obstacle(&mut session);
        tick(&mut session, &TickInput::default(), DT);
        assert_eq!(session.phase, GamePhase::GameOver);
        let high = session.high_score;

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut session, &restart, DT);
        assert_eq!(session.phase, GamePhase::Running);
        assert!(session.score < 1.0);
        assert!(session.obstacles.is_empty());
        assert!(session.collectibles.is_empty());
        assert_eq!(session.high_score, high);
        assert_eq!(session.player.pos, Vec3::new(0.0, PLAYER_SPAWN_Y, PLAYER_Z));
    }

    #[test]
    fn test_restart_ignored_outside_game_over() {
        let mut session = started();
        for _ in 0..120 {
            tick(&mut session, &TickInput::default(), DT);
        }
        let score_before = session.score;
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut session, &restart, DT);
        assert!(session.score > score_before);
    }

    #[test]
    fn test_long_run_spawns_and_culls() {
        let mut session = started();
        // ~40 simulated seconds: plenty of spawns, and the early ones must
        // have been culled after crossing z = -10
        for _ in 0..4800 {
            tick(&mut session, &TickInput::default(), DT);
            if session.phase != GamePhase::Running {
                // A spawned obstacle happened to drift into the player; that
                // is a legitimate end of the run for this seed
                break;
            }
            for obstacle in &session.obstacles {
                assert!(obstacle.pos.z >= CULL_Z && obstacle.pos.z <= SPAWN_Z);
            }
        }
        assert!(
            session
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::ObstacleSpawned { .. }))
        );
    }

    proptest! {
        #[test]
        fn prop_speed_invariant_under_arbitrary_frames(
            deltas in proptest::collection::vec(0.0001f32..0.05, 1..300),
        ) {
            let mut session = started();
            for dt in deltas {
                tick(&mut session, &TickInput::default(), dt);
                if session.phase != GamePhase::Running {
                    break;
                }
                let expected = session.base_speed + (session.score / 1000.0) * 0.1;
                prop_assert_eq!(session.game_speed, expected);
            }
        }

        #[test]
        fn prop_entities_stay_inside_corridor_bounds(
            seed in 0u64..10_000,
        ) {
            let mut session = GameSession::new(seed);
            let start = TickInput { start: true, ..Default::default() };
            tick(&mut session, &start, DT);
            for _ in 0..1200 {
                tick(&mut session, &TickInput::default(), DT);
                if session.phase != GamePhase::Running {
                    break;
                }
                for obstacle in &session.obstacles {
                    prop_assert!(obstacle.pos.z >= CULL_Z);
                    prop_assert!(obstacle.pos.z <= SPAWN_Z);
                }
                for collectible in &session.collectibles {
                    prop_assert!(collectible.pos.z >= CULL_Z);
                    prop_assert!(collectible.pos.z <= SPAWN_Z);
                }
            }
        }
    }
}
