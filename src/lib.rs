//! Cosmic Dash - an endless-runner space corridor game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, scoring)
//! - `input`: Keyboard state tracking and gesture detection
//! - `highscore`: Single-value LocalStorage persistence
//!
//! Rendering is delegated to a JavaScript presentation layer; the wasm shell
//! in `main.rs` drives the simulation from `requestAnimationFrame` and
//! forwards events and the player transform across the bridge.

pub mod highscore;
pub mod input;
pub mod sim;

pub use input::{GameKey, InputTracker};
pub use sim::{GameEvent, GamePhase, GameSession, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Wall-clock frame delta clamp (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Corridor geometry: entities spawn far ahead and are culled once they
    /// pass behind the player
    pub const SPAWN_Z: f32 = 50.0;
    pub const CULL_Z: f32 = -10.0;
    /// Interaction band where hit testing runs (exclusive bounds)
    pub const BAND_FAR_Z: f32 = -5.0;
    pub const BAND_NEAR_Z: f32 = -2.0;

    /// Lane grid: three slots per axis
    pub const LANE_STEP_X: f32 = 3.0;
    pub const LANE_STEP_Y: f32 = 2.5;
    pub const LANE_BASE_Y: f32 = 0.5;

    /// Spawn cadence (seconds)
    pub const OBSTACLE_INTERVAL: f32 = 1.5;
    pub const COLLECTIBLE_INTERVAL: f32 = 3.0;
    /// Probability a collectible is a shield rather than points
    pub const SHIELD_CHANCE: f32 = 0.3;

    /// Scroll speed and scoring
    pub const BASE_SPEED: f32 = 0.3;
    /// World units per speed unit per second
    pub const SPEED_SCALE: f32 = 60.0;
    /// Continuous score accrual per second
    pub const SCORE_RATE: f32 = 10.0;
    pub const POINTS_VALUE: f32 = 100.0;

    /// Collision radii (player radius is the fallback until the presentation
    /// layer reports a measured one)
    pub const PLAYER_RADIUS: f32 = 1.0;
    /// Unit box half-size at the 1.2 obstacle scale
    pub const OBSTACLE_RADIUS: f32 = 0.6;
    /// Half of the 0.8 collectible diameter
    pub const COLLECTIBLE_RADIUS: f32 = 0.4;

    /// Player flight model
    pub const ACCELERATION: f32 = 20.0;
    pub const DRAG: f32 = 5.0;
    pub const MAX_SPEED: f32 = 10.0;
    pub const BOUNDS_X: f32 = 10.0;
    pub const BOUNDS_Y: f32 = 6.0;
    pub const PLAYER_SPAWN_Y: f32 = 0.5;
    pub const PLAYER_Z: f32 = -3.0;

    /// Barrel roll
    pub const ROLL_DURATION: f32 = 0.6;
    pub const ROLL_IMPULSE: f32 = 18.0;
    /// Press-release window that counts as a roll tap (milliseconds)
    pub const ROLL_TAP_MS: f64 = 100.0;

    /// Shield window (seconds); reactivation restarts the full window
    pub const SHIELD_DURATION: f32 = 5.0;

    /// Banking tilt: target angle per velocity unit, and the rate constant
    /// of the exponential filter that approaches it
    pub const TILT_FACTOR: f32 = 0.05;
    pub const TILT_RATE: f32 = 5.0;
}
