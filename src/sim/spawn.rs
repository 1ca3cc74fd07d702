//! Timer-driven obstacle and collectible spawning
//!
//! Two independent timers advance while the game runs. Obstacles arrive
//! every 1.5 seconds with a random motion pattern, collectibles every
//! 3 seconds with a 30% shield chance. Lanes are drawn uniformly and
//! independently per axis. All randomness comes from the session RNG.

use glam::Vec3;
use rand::Rng;

use super::state::{
    Collectible, CollectibleKind, GameEvent, GameSession, MotionPattern, Obstacle,
};
use crate::consts::*;

/// Advance both spawn timers, emitting entities as intervals elapse.
pub fn update(session: &mut GameSession, dt: f32) {
    session.spawn_timer += dt;
    if session.spawn_timer > OBSTACLE_INTERVAL {
        spawn_obstacle(session);
        session.spawn_timer = 0.0;
    }

    session.collectible_timer += dt;
    if session.collectible_timer > COLLECTIBLE_INTERVAL {
        spawn_collectible(session);
        session.collectible_timer = 0.0;
    }
}

/// Uniform draw over the three lane slots {-1, 0, 1}
fn random_lane(rng: &mut impl Rng) -> f32 {
    rng.random_range(-1..=1) as f32
}

/// Lane-grid spawn position at the far end of the corridor
fn spawn_pos(rng: &mut impl Rng) -> Vec3 {
    let lane = random_lane(rng);
    let lane_y = random_lane(rng);
    Vec3::new(
        lane * LANE_STEP_X,
        LANE_BASE_Y + lane_y * LANE_STEP_Y,
        SPAWN_Z,
    )
}

fn spawn_obstacle(session: &mut GameSession) {
    let pattern = match session.rng.random_range(0..3) {
        0 => MotionPattern::Static,
        1 => MotionPattern::Sine,
        _ => MotionPattern::Circle,
    };
    let pos = spawn_pos(&mut session.rng);
    let id = session.next_entity_id();
    // Capture the current speed; this obstacle keeps it for life
    let speed = session.game_speed;
    session.obstacles.push(Obstacle {
        id,
        pos,
        speed,
        pattern,
        age: 0.0,
    });
    session.push_event(GameEvent::ObstacleSpawned {
        id,
        pattern,
        pos: pos.to_array(),
    });
}

fn spawn_collectible(session: &mut GameSession) {
    let kind = if session.rng.random::<f32>() > SHIELD_CHANCE {
        CollectibleKind::Points
    } else {
        CollectibleKind::Shield
    };
    let pos = spawn_pos(&mut session.rng);
    let id = session.next_entity_id();
    session.collectibles.push(Collectible {
        id,
        pos,
        kind,
        age: 0.0,
    });
    session.push_event(GameEvent::CollectibleSpawned {
        id,
        kind,
        pos: pos.to_array(),
    });
}
