//! Per-frame entity motion: corridor scroll, movement patterns, culling
//!
//! Pattern offsets are applied around a lane-quantized base recomputed from
//! the current position every frame, so the offsets never accumulate drift.
//! Quantization is round-to-nearest; offsets stay well inside half a lane
//! step, which keeps the base stable on both sides of the lane center.

use glam::{Vec2, Vec3};

use super::state::{GameEvent, GameSession, MotionPattern};
use crate::consts::*;

/// Lateral/vertical offset for an obstacle pattern at a given age.
pub fn pattern_offset(pattern: MotionPattern, age: f32) -> Vec2 {
    match pattern {
        MotionPattern::Static => Vec2::ZERO,
        MotionPattern::Sine => Vec2::new((age * 3.0).sin() * 0.5, 0.0),
        MotionPattern::Circle => Vec2::new((age * 2.0).sin(), (age * 2.0).cos() * 0.5),
    }
}

/// Nearest lane-grid anchor for a position.
pub fn lane_base(pos: Vec3) -> Vec2 {
    let x = (pos.x / LANE_STEP_X).round() * LANE_STEP_X;
    let y = ((pos.y - LANE_BASE_Y) / LANE_STEP_Y).round() * LANE_STEP_Y + LANE_BASE_Y;
    Vec2::new(x, y)
}

/// Advance every live entity and cull the ones that passed the player.
pub fn update(session: &mut GameSession, dt: f32) {
    let game_speed = session.game_speed;

    for obstacle in &mut session.obstacles {
        obstacle.age += dt;
        let base = lane_base(obstacle.pos);
        let offset = pattern_offset(obstacle.pattern, obstacle.age);
        obstacle.pos.x = base.x + offset.x;
        obstacle.pos.y = base.y + offset.y;
        // Obstacles scroll at their captured spawn-time speed
        obstacle.pos.z -= obstacle.speed * SPEED_SCALE * dt;
    }

    for collectible in &mut session.collectibles {
        collectible.age += dt;
        let base = lane_base(collectible.pos);
        collectible.pos.y = base.y + (collectible.age * 4.0).sin() * 0.2;
        // Collectibles ride the current game speed
        collectible.pos.z -= game_speed * SPEED_SCALE * dt;
    }

    cull(session);
}

/// Remove entities that crossed behind the player. A cull is not a scoring
/// or collision event; only a removal notice goes out.
fn cull(session: &mut GameSession) {
    let mut removed = Vec::new();
    session.obstacles.retain(|o| {
        if o.pos.z < CULL_Z {
            removed.push(o.id);
            false
        } else {
            true
        }
    });
    session.collectibles.retain(|c| {
        if c.pos.z < CULL_Z {
            removed.push(c.id);
            false
        } else {
            true
        }
    });
    for id in removed {
        session.push_event(GameEvent::EntityRemoved { id });
    }
}
