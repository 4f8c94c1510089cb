//! Save/load of trigger state.

use std::path::Path;

use chrono::{DateTime, Utc};
use plush_core::ThingId;
use serde::{Deserialize, Serialize};

use crate::error::{TriggerError, TriggerResult};
use crate::state::TriggerState;

/// Save-file format version written by this build.
pub const SAVE_VERSION: u32 = 1;

/// The persisted fields of one trigger.
///
/// Every key is optional on load. A missing chance is replaced by the
/// effective base chance at load time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TriggerSave {
    /// Live chance, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_chance: Option<f32>,
    /// Ticks since the last roll attempt.
    #[serde(default)]
    pub tick_counter: u32,
    /// Ticks of cooldown left.
    #[serde(default)]
    pub cooldown_counter: u32,
}

impl TriggerSave {
    /// Capture a state.
    pub fn from_state(state: &TriggerState) -> Self {
        Self {
            current_chance: Some(state.current_chance),
            tick_counter: state.tick_counter,
            cooldown_counter: state.cooldown_counter,
        }
    }

    /// Rebuild a state, using `default_chance` if none was saved.
    pub fn into_state(self, default_chance: f32) -> TriggerState {
        TriggerState {
            current_chance: self.current_chance.unwrap_or(default_chance),
            tick_counter: self.tick_counter,
            cooldown_counter: self.cooldown_counter,
        }
    }
}

/// One trigger in a save file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRecord {
    /// The host object carrying the trigger.
    pub thing: ThingId,
    /// Its saved fields.
    #[serde(flatten)]
    pub state: TriggerSave,
}

/// A whole save: every trigger plus the host tick it was taken at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    /// Format version.
    pub version: u32,
    /// When the save was written.
    pub saved_at: DateTime<Utc>,
    /// Host tick at save time.
    pub tick: u64,
    /// Saved triggers.
    #[serde(default)]
    pub triggers: Vec<TriggerRecord>,
}

impl SaveFile {
    /// An empty save at `tick`, stamped now.
    pub fn new(tick: u64) -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at: Utc::now(),
            tick,
            triggers: Vec::new(),
        }
    }

    /// Find the record for a thing.
    pub fn record(&self, thing: ThingId) -> Option<&TriggerRecord> {
        self.triggers.iter().find(|r| r.thing == thing)
    }

    /// Parse a save from JSON, rejecting unknown versions.
    pub fn from_json(json: &str) -> TriggerResult<Self> {
        let save: Self = serde_json::from_str(json)?;
        if save.version != SAVE_VERSION {
            return Err(TriggerError::UnsupportedSaveVersion {
                found: save.version,
                expected: SAVE_VERSION,
            });
        }
        Ok(save)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> TriggerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a save file from disk.
    pub fn load(path: &Path) -> TriggerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Write the save file to disk.
    pub fn save(&self, path: &Path) -> TriggerResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
