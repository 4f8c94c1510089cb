use serde::{Deserialize, Serialize};

use crate::config::TICKS_PER_SECOND;

/// Mutable state of one trigger. One instance per host object.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TriggerState {
    /// Live trigger probability in `[0, 1]`. `0.0` before spawn setup.
    pub current_chance: f32,
    /// Ticks since the last roll attempt.
    pub tick_counter: u32,
    /// Ticks left before rolls resume.
    pub cooldown_counter: u32,
}

impl TriggerState {
    /// A fresh state starting at `chance`.
    pub fn with_chance(chance: f32) -> Self {
        Self {
            current_chance: chance,
            ..Self::default()
        }
    }

    /// Whether rolls are currently suppressed.
    pub fn is_cooling_down(&self) -> bool {
        self.cooldown_counter > 0
    }

    /// Remaining cooldown in seconds of game time.
    pub fn cooldown_seconds(&self) -> f32 {
        self.cooldown_counter as f32 / TICKS_PER_SECOND as f32
    }

    /// Human-readable status for the inspect pane.
    pub fn status_string(&self) -> String {
        let mut result = format!("Trigger chance: {:.1}%", self.current_chance * 100.0);
        if self.is_cooling_down() {
            result.push_str(&format!("\nCooldown: {:.1}s", self.cooldown_seconds()));
        }
        result
    }
}
