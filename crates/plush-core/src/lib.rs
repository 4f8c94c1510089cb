//! Host data model for the plush trigger.
//!
//! This crate stands in for the host engine: it owns the actors living on a
//! map, the placed things that carry trigger components, and the definition
//! database that sounds, status effects, and mood memories are looked up in.
//! The trigger crate only ever talks to it through its `Host` trait, so any
//! other host can be swapped in.

/// Actor types: identifiers, factions, race classes, and placement.
pub mod actor;
/// Definition database for sounds, status effects, and mood memories.
pub mod defs;
/// Live status-effect and memory instances carried by actors.
pub mod effect;
/// Error types used throughout the crate.
pub mod error;
/// Query builder for filtering actors in a world.
pub mod query;
/// Placed things that can carry trigger components.
pub mod thing;
/// The in-memory world that owns actors, things, and definitions.
pub mod world;

/// Re-export core actor types.
pub use actor::{Actor, ActorId, FactionId, MapId, Placement, Position, RaceClass};
/// Re-export definition types.
pub use defs::{DefDatabase, EffectDef, MemoryDef, SoundDef};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export thing types.
pub use thing::{Thing, ThingId};
/// Re-export world model types.
pub use world::{DEFAULT_SOUND_LOG_LIMIT, PlayedSound, World};
