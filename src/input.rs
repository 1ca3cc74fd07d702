//! Keyboard input mapping
//!
//! Tracks held keys and turns raw key-down/key-up events into per-tick
//! commands: a continuous movement vector, edge-triggered pause toggles, and
//! the quick-tap barrel-roll gesture (press and release of a lateral key
//! within 100 ms). Timestamps come from the DOM events, so the tracker
//! itself stays platform-free and unit-testable.

use glam::Vec2;

use crate::consts::ROLL_TAP_MS;

/// Logical keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    Left,
    Right,
    Up,
    Down,
    Pause,
}

impl GameKey {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Self::Left),
            "ArrowRight" | "d" | "D" => Some(Self::Right),
            "ArrowUp" | "w" | "W" => Some(Self::Up),
            "ArrowDown" | "s" | "S" => Some(Self::Down),
            " " | "Spacebar" => Some(Self::Pause),
            _ => None,
        }
    }
}

/// Held-key state plus press timestamps for tap detection
#[derive(Debug, Default)]
pub struct InputTracker {
    // Press timestamp (ms) while the key is held
    left: Option<f64>,
    right: Option<f64>,
    up: Option<f64>,
    down: Option<f64>,
    pause_pending: bool,
    roll_pending: Option<f32>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press at `time_ms`. Auto-repeat presses of an already
    /// held key keep the original timestamp.
    pub fn key_down(&mut self, key: GameKey, time_ms: f64) {
        match key {
            GameKey::Left => {
                self.left.get_or_insert(time_ms);
            }
            GameKey::Right => {
                self.right.get_or_insert(time_ms);
            }
            GameKey::Up => {
                self.up.get_or_insert(time_ms);
            }
            GameKey::Down => {
                self.down.get_or_insert(time_ms);
            }
            GameKey::Pause => self.request_pause(),
        }
    }

    /// Record a key release; a lateral press-release under the tap window
    /// becomes a barrel-roll command.
    pub fn key_up(&mut self, key: GameKey, time_ms: f64) {
        match key {
            GameKey::Left => {
                if let Some(pressed) = self.left.take() {
                    if time_ms - pressed < ROLL_TAP_MS {
                        self.roll_pending = Some(-1.0);
                    }
                }
            }
            GameKey::Right => {
                if let Some(pressed) = self.right.take() {
                    if time_ms - pressed < ROLL_TAP_MS {
                        self.roll_pending = Some(1.0);
                    }
                }
            }
            GameKey::Up => self.up = None,
            GameKey::Down => self.down = None,
            GameKey::Pause => {}
        }
    }

    /// Queue a pause toggle (also used by the shell's auto-pause)
    pub fn request_pause(&mut self) {
        self.pause_pending = true;
    }

    /// Movement vector from the currently held keys, each axis in {-1, 0, 1}
    pub fn movement(&self) -> Vec2 {
        let x = (self.right.is_some() as i8 - self.left.is_some() as i8) as f32;
        let y = (self.up.is_some() as i8 - self.down.is_some() as i8) as f32;
        Vec2::new(x, y)
    }

    /// Take the pending pause toggle for this frame
    pub fn take_pause(&mut self) -> bool {
        std::mem::take(&mut self.pause_pending)
    }

    /// Take the pending roll command for this frame
    pub fn take_roll(&mut self) -> Option<f32> {
        self.roll_pending.take()
    }

    /// Drop all held keys and pending commands (focus loss, reset)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
