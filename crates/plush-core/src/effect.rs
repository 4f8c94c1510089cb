use serde::{Deserialize, Serialize};

use crate::defs::{EffectDef, MemoryDef};

/// A live status effect on an actor.
///
/// The duration timer starts when the instance is created, so replacing an
/// instance restarts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectInstance {
    /// Name of the effect definition.
    pub def: String,
    /// Ticks left before the effect wears off.
    pub remaining_ticks: u32,
}

impl EffectInstance {
    /// Create a fresh instance with the definition's full duration.
    pub fn from_def(def: &EffectDef) -> Self {
        Self {
            def: def.name.clone(),
            remaining_ticks: def.duration_ticks,
        }
    }
}

/// A mood memory held by an actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInstance {
    /// Name of the memory definition.
    pub def: String,
    /// Mood change while the memory lasts.
    pub mood_offset: f32,
    /// Ticks left before the memory fades.
    pub remaining_ticks: u32,
}

/// The mood memories of one actor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryBank {
    /// Memories currently affecting mood.
    pub memories: Vec<MemoryInstance>,
}

impl MemoryBank {
    /// Gain a memory. Gaining one that is already held refreshes it instead
    /// of stacking a second copy.
    pub fn gain(&mut self, def: &MemoryDef) {
        if let Some(existing) = self.memories.iter_mut().find(|m| m.def == def.name) {
            existing.remaining_ticks = def.duration_ticks;
            existing.mood_offset = def.mood_offset;
            return;
        }
        self.memories.push(MemoryInstance {
            def: def.name.clone(),
            mood_offset: def.mood_offset,
            remaining_ticks: def.duration_ticks,
        });
    }

    /// Whether a memory of the named definition is held.
    pub fn has(&self, def: &str) -> bool {
        self.memories.iter().any(|m| m.def == def)
    }

    /// Sum of all mood offsets.
    pub fn total_mood(&self) -> f32 {
        self.memories.iter().map(|m| m.mood_offset).sum()
    }

    /// Count every memory down by one tick and drop the expired ones.
    pub fn tick(&mut self) {
        for memory in &mut self.memories {
            memory.remaining_ticks = memory.remaining_ticks.saturating_sub(1);
        }
        self.memories.retain(|m| m.remaining_ticks > 0);
    }
}
