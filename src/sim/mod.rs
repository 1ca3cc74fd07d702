//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - dt-driven updates only, no wall clock
//! - Seeded RNG only, owned by the session
//! - No rendering or platform dependencies

pub mod collision;
pub mod motion;
pub mod player;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::CollisionOutcome;
pub use player::{PlayerState, RollState};
pub use state::{
    Collectible, CollectibleKind, GameEvent, GamePhase, GameSession, MotionPattern, Obstacle,
};
pub use tick::{TickInput, tick};
