//! Session state and core simulation types

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::player::PlayerState;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Initial state; instructions shown, nothing simulated
    Idle,
    /// Active gameplay
    Running,
    /// Frozen mid-run
    Paused,
    /// Run ended on a fatal collision; terminal until restart
    GameOver,
}

/// Obstacle motion patterns - a closed set, dispatched by match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPattern {
    Static,
    Sine,
    Circle,
}

/// Collectible payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectibleKind {
    Points,
    Shield,
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec3,
    /// Game speed captured at spawn time; late spawns are faster than old ones
    pub speed: f32,
    pub pattern: MotionPattern,
    /// Seconds since spawn, drives the pattern offset
    pub age: f32,
}

/// A pickup scrolling toward the player (moves at the current game speed)
#[derive(Debug, Clone)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec3,
    pub kind: CollectibleKind,
    pub age: f32,
}

/// Events for the presentation and UI collaborators, drained once per frame
/// by the shell and forwarded over the JS bridge as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    ObstacleSpawned {
        id: u32,
        pattern: MotionPattern,
        pos: [f32; 3],
    },
    CollectibleSpawned {
        id: u32,
        kind: CollectibleKind,
        pos: [f32; 3],
    },
    /// Entity left the simulation (culled, collected, or destroyed)
    EntityRemoved { id: u32 },
    /// Transient explosion effect at a world position
    Explosion { pos: [f32; 3] },
    ShieldActivated,
    ShieldExpired,
    GameOver { final_score: u32 },
    NewHighScore { value: u32 },
}

/// Complete game session state. Owned by the shell and passed explicitly
/// into every system call; nothing in the simulation is ambient.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG, consumed by the spawn controller
    pub rng: Pcg32,
    pub score: f32,
    /// Best floor(score) across sessions; persisted by the shell
    pub high_score: u32,
    pub base_speed: f32,
    /// Derived each frame: `base_speed + (score / 1000) * 0.1`
    pub game_speed: f32,
    pub spawn_timer: f32,
    pub collectible_timer: f32,
    pub phase: GamePhase,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub player: PlayerState,
    /// Pending events for the collaborators, drained by the shell
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameSession {
    /// Create an idle session with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0.0,
            high_score: 0,
            base_speed: BASE_SPEED,
            game_speed: BASE_SPEED,
            spawn_timer: 0.0,
            collectible_timer: 0.0,
            phase: GamePhase::Idle,
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            player: PlayerState::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the pending events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reset for a fresh run. The high score and RNG stream survive;
    /// everything else goes back to its initial value. Removal events are
    /// emitted for every live entity so the visual layer can clean up.
    pub fn reset_run(&mut self) {
        self.events.clear();
        for obstacle in self.obstacles.drain(..) {
            self.events.push(GameEvent::EntityRemoved { id: obstacle.id });
        }
        for collectible in self.collectibles.drain(..) {
            self.events.push(GameEvent::EntityRemoved { id: collectible.id });
        }
        self.score = 0.0;
        self.game_speed = self.base_speed;
        self.spawn_timer = 0.0;
        self.collectible_timer = 0.0;
        self.player.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SHIELD_DURATION;

    #[test]
    fn test_new_session_is_idle() {
        let session = GameSession::new(7);
        assert_eq!(session.phase, GamePhase::Idle);
        assert_eq!(session.score, 0.0);
        assert_eq!(session.game_speed, session.base_speed);
        assert!(session.obstacles.is_empty());
        assert!(session.collectibles.is_empty());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut session = GameSession::new(7);
        let a = session.next_entity_id();
        let b = session.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_reset_run_preserves_high_score_and_clears_entities() {
        let mut session = GameSession::new(7);
        session.high_score = 4200;
        session.score = 512.0;
        session.game_speed = 0.5;
        session.player.shield_remaining = SHIELD_DURATION;
        let id = session.next_entity_id();
        session.obstacles.push(Obstacle {
            id,
            pos: Vec3::new(0.0, 0.5, 20.0),
            speed: 0.3,
            pattern: MotionPattern::Static,
            age: 0.0,
        });

        session.reset_run();

        assert_eq!(session.high_score, 4200);
        assert_eq!(session.score, 0.0);
        assert_eq!(session.game_speed, session.base_speed);
        assert!(session.obstacles.is_empty());
        assert!(!session.player.shield_active());
        assert_eq!(session.events, vec![GameEvent::EntityRemoved { id }]);
    }

    #[test]
    fn test_events_serialize_with_tag() {
        let event = GameEvent::ObstacleSpawned {
            id: 3,
            pattern: MotionPattern::Sine,
            pos: [0.0, 0.5, 50.0],
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"obstacle_spawned\""));
        assert!(json.contains("\"pattern\":\"sine\""));
    }
}
