use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A playable sound resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundDef {
    /// Unique definition name.
    pub name: String,
}

impl SoundDef {
    /// Create a sound definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A timed status effect that can be applied to an actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDef {
    /// Unique definition name.
    pub name: String,
    /// How long a fresh instance lasts.
    pub duration_ticks: u32,
}

impl EffectDef {
    /// Create an effect definition.
    pub fn new(name: impl Into<String>, duration_ticks: u32) -> Self {
        Self {
            name: name.into(),
            duration_ticks,
        }
    }
}

/// A mood memory that can be granted to actors with a mood subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryDef {
    /// Unique definition name.
    pub name: String,
    /// Mood change while the memory lasts.
    pub mood_offset: f32,
    /// How long the memory lasts.
    pub duration_ticks: u32,
}

impl MemoryDef {
    /// Create a memory definition.
    pub fn new(name: impl Into<String>, mood_offset: f32, duration_ticks: u32) -> Self {
        Self {
            name: name.into(),
            mood_offset,
            duration_ticks,
        }
    }
}

/// Every definition the host knows about.
///
/// Sounds keep insertion order, which is the order the catalog reports them
/// in. All lookups are exact-name and silent: a missing name is `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefDatabase {
    sounds: Vec<SoundDef>,
    effects: HashMap<String, EffectDef>,
    memories: HashMap<String, MemoryDef>,
}

impl DefDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sound. Re-registering a name is ignored.
    pub fn add_sound(&mut self, def: SoundDef) {
        if self.sound(&def.name).is_none() {
            self.sounds.push(def);
        }
    }

    /// Register (or replace) an effect definition.
    pub fn add_effect(&mut self, def: EffectDef) {
        self.effects.insert(def.name.clone(), def);
    }

    /// Register (or replace) a memory definition.
    pub fn add_memory(&mut self, def: MemoryDef) {
        self.memories.insert(def.name.clone(), def);
    }

    /// All sounds in registration order.
    pub fn sounds(&self) -> &[SoundDef] {
        &self.sounds
    }

    /// Look up a sound by exact name.
    pub fn sound(&self, name: &str) -> Option<&SoundDef> {
        self.sounds.iter().find(|s| s.name == name)
    }

    /// Look up an effect by exact name.
    pub fn effect(&self, name: &str) -> Option<&EffectDef> {
        self.effects.get(name)
    }

    /// Look up a memory by exact name.
    pub fn memory(&self, name: &str) -> Option<&MemoryDef> {
        self.memories.get(name)
    }
}
