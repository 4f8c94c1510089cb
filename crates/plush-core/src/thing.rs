use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::actor::Placement;

/// Unique identifier for a placed thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThingId(pub Uuid);

impl ThingId {
    /// Generate a new random thing ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// A fixed ID, for hosts that need stable IDs across runs.
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }
}

impl Default for ThingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ThingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// An object placed in the world, such as a plush toy on a shelf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thing {
    /// Unique identifier for this thing.
    pub id: ThingId,
    /// Display label.
    pub label: String,
    /// True while the thing is physically present on a map.
    pub spawned: bool,
    /// Map and cell, if placed.
    pub placement: Option<Placement>,
}

impl Thing {
    /// Create an unplaced thing with a random ID.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_id(ThingId::new(), label)
    }

    /// Create an unplaced thing with a pre-assigned ID.
    pub fn with_id(id: ThingId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            spawned: false,
            placement: None,
        }
    }

    /// Place the thing.
    pub fn spawned_at(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self.spawned = true;
        self
    }

    /// Current placement, only while spawned.
    pub fn active_placement(&self) -> Option<Placement> {
        if self.spawned { self.placement } else { None }
    }
}
