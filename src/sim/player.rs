//! Free-flight player controller
//!
//! Continuous 2D input drives an acceleration/drag flight model inside a
//! clamped corridor cross-section. A quick directional tap triggers a
//! barrel roll: a lateral impulse plus a full 360° bank over 0.6 seconds.
//! The shield is a plain countdown checked every tick; there are no
//! deferred timers anywhere in the simulation.

use glam::{Vec2, Vec3};

use super::state::GameEvent;
use crate::consts::*;

/// Barrel-roll state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RollState {
    Idle,
    Rolling {
        /// -1.0 left, +1.0 right
        direction: f32,
        elapsed: f32,
        /// Bank angle to restore when the roll completes
        start_rotation: f32,
    },
}

/// Player ship state. Mutated only through its own methods.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Held input direction, each axis in [-1, 1]
    pub input: Vec2,
    /// Euler rotation (x = pitch, z = bank); presentation-facing
    pub rotation: Vec3,
    /// Seconds of shield remaining; 0 = inactive
    pub shield_remaining: f32,
    pub roll: RollState,
    pub bounding_radius: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            pos: Vec3::new(0.0, PLAYER_SPAWN_Y, PLAYER_Z),
            vel: Vec3::ZERO,
            input: Vec2::ZERO,
            rotation: Vec3::ZERO,
            shield_remaining: 0.0,
            roll: RollState::Idle,
            bounding_radius: PLAYER_RADIUS,
        }
    }

    pub fn shield_active(&self) -> bool {
        self.shield_remaining > 0.0
    }

    pub fn set_input(&mut self, input: Vec2) {
        self.input = input;
    }

    /// Begin a barrel roll with a lateral dodge impulse. No-op while a roll
    /// is already in progress.
    pub fn barrel_roll(&mut self, direction: f32) {
        if matches!(self.roll, RollState::Rolling { .. }) {
            return;
        }
        self.roll = RollState::Rolling {
            direction,
            elapsed: 0.0,
            start_rotation: self.rotation.z,
        };
        self.vel.x += direction * ROLL_IMPULSE;
    }

    /// (Re)arm the shield for the full window. Reactivating while active
    /// restarts the 5-second countdown.
    pub fn activate_shield(&mut self) {
        self.shield_remaining = SHIELD_DURATION;
    }

    /// Integrate one timestep of flight physics, the shield countdown, and
    /// the roll/banking animation. Shield expiry is reported through
    /// `events`.
    pub fn update(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        if self.input.length_squared() > 0.1 {
            self.vel.x += self.input.x * ACCELERATION * dt;
            self.vel.y += self.input.y * ACCELERATION * dt;
        }

        self.vel.x -= self.vel.x * DRAG * dt;
        self.vel.y -= self.vel.y * DRAG * dt;

        if self.vel.length() > MAX_SPEED {
            self.vel = self.vel.normalize() * MAX_SPEED;
        }
        // Kill sub-perceptible drift
        if self.vel.length_squared() < 0.01 {
            self.vel = Vec3::ZERO;
        }

        self.pos += self.vel * dt;
        self.pos.x = self.pos.x.clamp(-BOUNDS_X, BOUNDS_X);
        self.pos.y = self.pos.y.clamp(-BOUNDS_Y, BOUNDS_Y);

        if self.shield_remaining > 0.0 {
            self.shield_remaining -= dt;
            if self.shield_remaining <= 0.0 {
                self.shield_remaining = 0.0;
                events.push(GameEvent::ShieldExpired);
            }
        }

        // Frame-rate-independent smoothing factor for the tilt filters
        let blend = 1.0 - (-TILT_RATE * dt).exp();

        if let RollState::Rolling {
            direction,
            elapsed,
            start_rotation,
        } = self.roll
        {
            let elapsed = elapsed + dt;
            if elapsed >= ROLL_DURATION {
                self.rotation.z = start_rotation;
                self.roll = RollState::Idle;
            } else {
                let progress = elapsed / ROLL_DURATION;
                // Left (-1) rolls through a positive rotation
                self.rotation.z = start_rotation - direction * std::f32::consts::TAU * progress;
                self.roll = RollState::Rolling {
                    direction,
                    elapsed,
                    start_rotation,
                };

                // Pitch keeps tracking vertical motion mid-roll
                let target_pitch = -self.vel.y * TILT_FACTOR;
                self.rotation.x += (target_pitch - self.rotation.x) * blend;
                return;
            }
        }

        // Banking tilt follows lateral velocity
        let target_bank = -self.vel.x * TILT_FACTOR;
        let target_pitch = -self.vel.y * TILT_FACTOR;
        self.rotation.z += (target_bank - self.rotation.z) * blend;
        self.rotation.x += (target_pitch - self.rotation.x) * blend;
    }

    /// Back to the spawn state. The measured bounding radius is kept; it
    /// belongs to the ship model, not the run.
    pub fn reset(&mut self) {
        let bounding_radius = self.bounding_radius;
        *self = Self {
            bounding_radius,
            ..Self::new()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 120.0;

    fn step(player: &mut PlayerState, dt: f32) {
        let mut events = Vec::new();
        player.update(dt, &mut events);
    }

    #[test]
    fn test_input_accelerates_and_drag_stops() {
        let mut player = PlayerState::new();
        player.set_input(Vec2::new(1.0, 0.0));
        for _ in 0..60 {
            step(&mut player, DT);
        }
        assert!(player.vel.x > 0.0);
        assert!(player.pos.x > 0.0);

        player.set_input(Vec2::ZERO);
        for _ in 0..600 {
            step(&mut player, DT);
        }
        assert_eq!(player.vel, Vec3::ZERO);
    }

    #[test]
    fn test_position_clamped_to_corridor() {
        let mut player = PlayerState::new();
        player.set_input(Vec2::new(1.0, 1.0));
        for _ in 0..2400 {
            step(&mut player, DT);
        }
        assert_eq!(player.pos.x, BOUNDS_X);
        assert_eq!(player.pos.y, BOUNDS_Y);
    }

    #[test]
    fn test_barrel_roll_completes_and_restores_bank() {
        let mut player = PlayerState::new();
        let start_bank = player.rotation.z;
        player.barrel_roll(1.0);
        assert!(matches!(player.roll, RollState::Rolling { .. }));
        assert_eq!(player.vel.x, ROLL_IMPULSE);

        // Mid-roll the bank angle swings away from its start value
        for _ in 0..36 {
            step(&mut player, DT);
        }
        assert!(matches!(player.roll, RollState::Rolling { .. }));
        assert!((player.rotation.z - start_bank).abs() > 1.0);

        for _ in 0..60 {
            step(&mut player, DT);
        }
        assert_eq!(player.roll, RollState::Idle);
    }

    #[test]
    fn test_roll_ignored_while_rolling() {
        let mut player = PlayerState::new();
        player.barrel_roll(1.0);
        let vel_after_first = player.vel.x;
        player.barrel_roll(-1.0);
        assert_eq!(player.vel.x, vel_after_first);
        match player.roll {
            RollState::Rolling { direction, .. } => assert_eq!(direction, 1.0),
            RollState::Idle => panic!("roll should still be in progress"),
        }
    }

    #[test]
    fn test_shield_expires_once_with_event() {
        let mut player = PlayerState::new();
        player.activate_shield();
        assert!(player.shield_active());

        let mut events = Vec::new();
        let steps = (SHIELD_DURATION / DT) as usize + 2;
        for _ in 0..steps {
            player.update(DT, &mut events);
        }
        assert!(!player.shield_active());
        let expiries = events
            .iter()
            .filter(|e| **e == GameEvent::ShieldExpired)
            .count();
        assert_eq!(expiries, 1);
    }

    #[test]
    fn test_reactivation_restarts_window() {
        let mut player = PlayerState::new();
        player.activate_shield();
        for _ in 0..300 {
            step(&mut player, DT); // 2.5 s
        }
        player.activate_shield();
        assert_eq!(player.shield_remaining, SHIELD_DURATION);
    }

    #[test]
    fn test_reset_keeps_bounding_radius() {
        let mut player = PlayerState::new();
        player.bounding_radius = 1.4;
        player.pos.x = 5.0;
        player.activate_shield();
        player.reset();
        assert_eq!(player.bounding_radius, 1.4);
        assert_eq!(player.pos, Vec3::new(0.0, PLAYER_SPAWN_Y, PLAYER_Z));
        assert!(!player.shield_active());
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            inputs in proptest::collection::vec((-1.0f32..=1.0, -1.0f32..=1.0), 1..200),
            dt in 0.001f32..0.1,
        ) {
            let mut player = PlayerState::new();
            for (x, y) in inputs {
                player.set_input(Vec2::new(x, y));
                step(&mut player, dt);
                prop_assert!(player.pos.x >= -BOUNDS_X && player.pos.x <= BOUNDS_X);
                prop_assert!(player.pos.y >= -BOUNDS_Y && player.pos.y <= BOUNDS_Y);
            }
        }
    }
}
