//! Score accrual and derived difficulty
//!
//! Score rises continuously with survival time; pickup bonuses land in the
//! collision pass. Game speed is never stored as an independent mutation -
//! it is recomputed from the score after each frame's accrual, so the
//! difficulty curve is a pure function of score.

use super::state::GameSession;
use crate::consts::SCORE_RATE;

/// Difficulty curve: +0.1 speed per 1000 points.
pub fn game_speed_for(base_speed: f32, score: f32) -> f32 {
    base_speed + (score / 1000.0) * 0.1
}

/// Apply one frame of time-based accrual and rederive the game speed.
pub fn update(session: &mut GameSession, dt: f32) {
    session.score += dt * SCORE_RATE;
    session.game_speed = game_speed_for(session.base_speed, session.score);
}
