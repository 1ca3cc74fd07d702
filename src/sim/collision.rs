//! Distance-based hit testing inside the interaction band
//!
//! Entities only interact with the player while their z lies strictly inside
//! (-5, -2). Hits are sphere tests: Euclidean distance against the sum of the
//! player's bounding radius and a fixed per-kind entity radius. Obstacles are
//! processed before collectibles each frame; entities never interact with
//! each other.

use glam::Vec3;

use super::state::{CollectibleKind, GameEvent, GameSession};
use crate::consts::*;

/// True when z lies strictly inside the interaction band.
pub fn in_band(z: f32) -> bool {
    z > BAND_FAR_Z && z < BAND_NEAR_Z
}

/// Sphere test against the player, gated on the band.
pub fn hits_player(pos: Vec3, entity_radius: f32, player_pos: Vec3, player_radius: f32) -> bool {
    in_band(pos.z) && pos.distance(player_pos) < player_radius + entity_radius
}

/// Outcome of the collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    Survived,
    /// An unshielded obstacle hit; the caller must end the run and stop the
    /// rest of the frame's processing
    Fatal,
}

/// Run the collision pass: obstacles first, then collectibles.
pub fn update(session: &mut GameSession) -> CollisionOutcome {
    let player_pos = session.player.pos;
    let player_radius = session.player.bounding_radius;
    let shielded = session.player.shield_active();

    let mut i = 0;
    while i < session.obstacles.len() {
        let obstacle = &session.obstacles[i];
        if hits_player(obstacle.pos, OBSTACLE_RADIUS, player_pos, player_radius) {
            if !shielded {
                return CollisionOutcome::Fatal;
            }
            // The shield eats the hit; its own countdown is untouched
            let obstacle = session.obstacles.swap_remove(i);
            session.push_event(GameEvent::Explosion {
                pos: obstacle.pos.to_array(),
            });
            session.push_event(GameEvent::EntityRemoved { id: obstacle.id });
            continue;
        }
        i += 1;
    }

    let mut i = 0;
    while i < session.collectibles.len() {
        let collectible = &session.collectibles[i];
        if hits_player(collectible.pos, COLLECTIBLE_RADIUS, player_pos, player_radius) {
            let collectible = session.collectibles.swap_remove(i);
            match collectible.kind {
                CollectibleKind::Points => session.score += POINTS_VALUE,
                CollectibleKind::Shield => {
                    session.player.activate_shield();
                    session.push_event(GameEvent::ShieldActivated);
                }
            }
            session.push_event(GameEvent::EntityRemoved {
                id: collectible.id,
            });
            continue;
        }
        i += 1;
    }

    CollisionOutcome::Survived
}
