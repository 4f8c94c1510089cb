use serde::{Deserialize, Serialize};

use crate::error::{TriggerError, TriggerResult};

/// Host ticks per real-time second at normal game speed.
pub const TICKS_PER_SECOND: u32 = 60;

/// Per-component defaults, as authored on the host object's definition.
///
/// Values here are the fallback layer: live settings override
/// `base_chance` and `chance_increment` at the point of use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerProps {
    /// Ticks between roll attempts. Must be positive.
    pub tick_interval: u32,
    /// Starting probability and reset target after a success.
    pub base_chance: f32,
    /// Added to the chance after each failed roll.
    pub chance_increment: f32,
    /// Quiet period after a success.
    pub sound_cooldown_ticks: u32,
    /// Sound looked up by exact name when no prefixed sound exists.
    pub fallback_sound: String,
    /// Status effect applied on success. Required for buffs.
    pub buff_effect: String,
    /// Mood memory granted alongside the buff. Optional.
    pub buff_memory: String,
}

impl Default for TriggerProps {
    fn default() -> Self {
        Self {
            tick_interval: 1200,
            base_chance: 0.01,
            chance_increment: 0.01,
            sound_cooldown_ticks: 300,
            fallback_sound: "Cat_Meow".to_string(),
            buff_effect: "PlushComfort".to_string(),
            buff_memory: "PlushComfortMemory".to_string(),
        }
    }
}

impl TriggerProps {
    /// Set the number of ticks between roll attempts.
    pub fn with_tick_interval(mut self, ticks: u32) -> Self {
        self.tick_interval = ticks;
        self
    }

    /// Set the base chance.
    pub fn with_base_chance(mut self, chance: f32) -> Self {
        self.base_chance = chance;
        self
    }

    /// Set the per-failure increment.
    pub fn with_chance_increment(mut self, increment: f32) -> Self {
        self.chance_increment = increment;
        self
    }

    /// Set the post-success cooldown.
    pub fn with_cooldown_ticks(mut self, ticks: u32) -> Self {
        self.sound_cooldown_ticks = ticks;
        self
    }

    /// Set the fallback sound name.
    pub fn with_fallback_sound(mut self, name: impl Into<String>) -> Self {
        self.fallback_sound = name.into();
        self
    }

    /// Set the buff effect and memory names.
    pub fn with_buff(mut self, effect: impl Into<String>, memory: impl Into<String>) -> Self {
        self.buff_effect = effect.into();
        self.buff_memory = memory.into();
        self
    }

    /// Reject values the trigger cannot run with.
    pub fn validate(&self) -> TriggerResult<()> {
        if self.tick_interval == 0 {
            return Err(TriggerError::InvalidProps(
                "tick_interval must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.base_chance) {
            return Err(TriggerError::InvalidProps(format!(
                "base_chance {} is outside [0, 1]",
                self.base_chance
            )));
        }
        if !self.chance_increment.is_finite() || self.chance_increment < 0.0 {
            return Err(TriggerError::InvalidProps(format!(
                "chance_increment {} must be a non-negative number",
                self.chance_increment
            )));
        }
        Ok(())
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for deterministic simulation.
    pub seed: u64,
    /// Sounds whose names start with this prefix make up the sound registry.
    pub sound_prefix: String,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            sound_prefix: "Plush_".to_string(),
            max_events: 0,
        }
    }
}

impl SimConfig {
    /// Set the RNG seed for deterministic simulation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the sound name prefix.
    pub fn with_sound_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.sound_prefix = prefix.into();
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }
}
