use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::effect::{EffectInstance, MemoryBank};

/// Unique identifier for every actor in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    /// Generate a new random actor ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Identifier of a map (one simulated area of the host).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapId(pub u32);

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map#{}", self.0)
    }
}

/// Identifier of a faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FactionId(pub u32);

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "faction#{}", self.0)
    }
}

/// A cell on a map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// East-west coordinate.
    pub x: i32,
    /// North-south coordinate.
    pub z: i32,
}

impl Position {
    /// Create a position from its two grid coordinates.
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Where something sits: a map plus a cell on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// The map the object is on.
    pub map: MapId,
    /// The cell on that map.
    pub position: Position,
}

impl Placement {
    /// Create a placement on `map` at `position`.
    pub fn new(map: MapId, position: Position) -> Self {
        Self { map, position }
    }
}

/// Broad capability class of an actor's race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceClass {
    /// People: can hold jobs, have moods, and receive social buffs.
    Humanlike,
    /// Animals, tame or wild.
    Animal,
    /// Machines.
    Mechanoid,
}

impl RaceClass {
    /// Whether this class is humanlike.
    pub fn is_humanlike(self) -> bool {
        matches!(self, Self::Humanlike)
    }

    /// Parse a class name ("humanlike", "animal", "mechanoid").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "humanlike" | "human" => Some(Self::Humanlike),
            "animal" => Some(Self::Animal),
            "mechanoid" | "mech" => Some(Self::Mechanoid),
            _ => None,
        }
    }
}

impl fmt::Display for RaceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Humanlike => write!(f, "humanlike"),
            Self::Animal => write!(f, "animal"),
            Self::Mechanoid => write!(f, "mechanoid"),
        }
    }
}

/// A living (or formerly living) creature in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Unique identifier for this actor.
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Owning faction, if any. Wild animals have none.
    pub faction: Option<FactionId>,
    /// Race capability class.
    pub race: RaceClass,
    /// False once the actor has died.
    pub alive: bool,
    /// True while the actor is physically present on a map.
    pub spawned: bool,
    /// Current map and cell, if spawned somewhere.
    pub placement: Option<Placement>,
    /// Active status effects.
    pub effects: Vec<EffectInstance>,
    /// Mood memories. `None` for actors without a mood subsystem.
    pub memories: Option<MemoryBank>,
}

impl Actor {
    /// Create a live, unspawned actor with a random ID.
    ///
    /// Humanlike actors get an empty memory bank; other classes have none.
    pub fn new(name: impl Into<String>, race: RaceClass) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            faction: None,
            race,
            alive: true,
            spawned: false,
            placement: None,
            effects: Vec::new(),
            memories: race.is_humanlike().then(MemoryBank::default),
        }
    }

    /// Set the owning faction.
    pub fn with_faction(mut self, faction: FactionId) -> Self {
        self.faction = Some(faction);
        self
    }

    /// Spawn the actor at a placement.
    pub fn spawned_at(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self.spawned = true;
        self
    }

    /// Remove the mood subsystem from this actor.
    pub fn without_memories(mut self) -> Self {
        self.memories = None;
        self
    }

    /// The map the actor is currently spawned on, if any.
    pub fn map(&self) -> Option<MapId> {
        if self.spawned {
            self.placement.map(|p| p.map)
        } else {
            None
        }
    }

    /// Number of active instances of the named effect.
    pub fn effect_count(&self, def: &str) -> usize {
        self.effects.iter().filter(|e| e.def == def).count()
    }

    /// First active instance of the named effect.
    pub fn effect(&self, def: &str) -> Option<&EffectInstance> {
        self.effects.iter().find(|e| e.def == def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_id_display_shows_short_form() {
        let id = ActorId(Uuid::parse_str("a3f2b1c8-1234-5678-9abc-def012345678").unwrap());
        assert_eq!(id.to_string(), "a3f2b1c8");
    }

    #[test]
    fn humanlike_gets_memory_bank() {
        let human = Actor::new("Mira", RaceClass::Humanlike);
        let cat = Actor::new("Tabby", RaceClass::Animal);
        assert!(human.memories.is_some());
        assert!(cat.memories.is_none());
    }

    #[test]
    fn map_only_when_spawned() {
        let placement = Placement::new(MapId(1), Position::new(3, 4));
        let mut actor = Actor::new("Mira", RaceClass::Humanlike).spawned_at(placement);
        assert_eq!(actor.map(), Some(MapId(1)));
        actor.spawned = false;
        assert_eq!(actor.map(), None);
    }

    #[test]
    fn race_class_parse() {
        assert_eq!(RaceClass::parse("Humanlike"), Some(RaceClass::Humanlike));
        assert_eq!(RaceClass::parse("animal"), Some(RaceClass::Animal));
        assert_eq!(RaceClass::parse("mech"), Some(RaceClass::Mechanoid));
        assert_eq!(RaceClass::parse("plant"), None);
    }

    #[test]
    fn race_class_serde_snake_case() {
        let json = serde_json::to_string(&RaceClass::Humanlike).unwrap();
        assert_eq!(json, "\"humanlike\"");
    }
}
