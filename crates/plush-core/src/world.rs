use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::actor::{Actor, ActorId, FactionId, Placement};
use crate::defs::{DefDatabase, EffectDef, MemoryDef, SoundDef};
use crate::effect::EffectInstance;
use crate::error::{CoreError, CoreResult};
use crate::query::ActorQuery;
use crate::thing::{Thing, ThingId};

/// Played sounds kept by default before the oldest are dropped.
pub const DEFAULT_SOUND_LOG_LIMIT: usize = 1000;

/// A sound that was played, as heard by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayedSound {
    /// Host tick at which playback started.
    pub tick: u64,
    /// Name of the sound definition.
    pub sound: String,
    /// Where the sound was anchored.
    pub placement: Placement,
    /// Volume factor relative to nominal.
    pub volume: f32,
}

/// The in-memory host world. Owns all actors, things, and definitions.
#[derive(Debug, Clone)]
pub struct World {
    player_faction: FactionId,
    actors: HashMap<ActorId, Actor>,
    things: HashMap<ThingId, Thing>,
    defs: DefDatabase,
    played: Vec<PlayedSound>,
    max_played: usize,
    total_played: u64,
    tick: u64,

    // Indexes
    by_name_lower: HashMap<String, ActorId>,
}

impl World {
    /// Create an empty world controlled by `player_faction`.
    pub fn new(player_faction: FactionId) -> Self {
        Self {
            player_faction,
            actors: HashMap::new(),
            things: HashMap::new(),
            defs: DefDatabase::new(),
            played: Vec::new(),
            max_played: DEFAULT_SOUND_LOG_LIMIT,
            total_played: 0,
            tick: 0,
            by_name_lower: HashMap::new(),
        }
    }

    /// Keep at most `limit` played sounds (0 = unlimited).
    pub fn with_sound_log_limit(mut self, limit: usize) -> Self {
        self.max_played = limit;
        self
    }

    /// The faction the player controls.
    pub fn player_faction(&self) -> FactionId {
        self.player_faction
    }

    /// Host tick counter, advanced by [`World::tick_effects`].
    pub fn tick(&self) -> u64 {
        self.tick
    }

    // -----------------------------------------------------------------------
    // Definitions
    // -----------------------------------------------------------------------

    /// The definition database.
    pub fn defs(&self) -> &DefDatabase {
        &self.defs
    }

    /// Mutable access to the definition database.
    pub fn defs_mut(&mut self) -> &mut DefDatabase {
        &mut self.defs
    }

    // -----------------------------------------------------------------------
    // Actor CRUD
    // -----------------------------------------------------------------------

    /// Add an actor. Returns the actor's ID.
    pub fn add_actor(&mut self, actor: Actor) -> CoreResult<ActorId> {
        let name_lower = actor.name.to_lowercase();
        if self.by_name_lower.contains_key(&name_lower) {
            return Err(CoreError::DuplicateName(actor.name.clone()));
        }

        let id = actor.id;
        self.by_name_lower.insert(name_lower, id);
        self.actors.insert(id, actor);
        Ok(id)
    }

    /// Get an actor by ID.
    pub fn get_actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Get a mutable reference to an actor by ID.
    pub fn get_actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Find an actor by name (case-insensitive).
    pub fn find_actor_by_name(&self, name: &str) -> Option<&Actor> {
        self.by_name_lower
            .get(&name.to_lowercase())
            .and_then(|id| self.actors.get(id))
    }

    /// Remove an actor from the world.
    pub fn remove_actor(&mut self, id: ActorId) -> CoreResult<Actor> {
        let actor = self.actors.remove(&id).ok_or(CoreError::ActorNotFound(id))?;
        self.by_name_lower.remove(&actor.name.to_lowercase());
        Ok(actor)
    }

    /// Mark an actor dead. Dead actors stay in the world.
    pub fn kill_actor(&mut self, id: ActorId) -> CoreResult<()> {
        let actor = self.actors.get_mut(&id).ok_or(CoreError::ActorNotFound(id))?;
        actor.alive = false;
        Ok(())
    }

    /// Take an actor off its map without removing it from the world.
    pub fn despawn_actor(&mut self, id: ActorId) -> CoreResult<()> {
        let actor = self.actors.get_mut(&id).ok_or(CoreError::ActorNotFound(id))?;
        actor.spawned = false;
        Ok(())
    }

    /// Get all actors.
    pub fn all_actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    /// Start a filtered actor query.
    pub fn query(&self) -> ActorQuery<'_> {
        ActorQuery::new(self)
    }

    /// Name of an actor, or a placeholder if it is unknown.
    pub fn actor_name(&self, id: ActorId) -> &str {
        self.actors.get(&id).map(|a| a.name.as_str()).unwrap_or("<unknown>")
    }

    // -----------------------------------------------------------------------
    // Thing CRUD
    // -----------------------------------------------------------------------

    /// Add a thing. Returns the thing's ID.
    pub fn add_thing(&mut self, thing: Thing) -> CoreResult<ThingId> {
        let id = thing.id;
        if self.things.contains_key(&id) {
            return Err(CoreError::DuplicateThing(id));
        }
        self.things.insert(id, thing);
        Ok(id)
    }

    /// Get a thing by ID.
    pub fn get_thing(&self, id: ThingId) -> Option<&Thing> {
        self.things.get(&id)
    }

    /// Take a thing off its map. Its components stop ticking.
    pub fn despawn_thing(&mut self, id: ThingId) -> CoreResult<()> {
        let thing = self.things.get_mut(&id).ok_or(CoreError::ThingNotFound(id))?;
        thing.spawned = false;
        Ok(())
    }

    /// Put a thing (back) onto a map.
    pub fn spawn_thing(&mut self, id: ThingId, placement: Placement) -> CoreResult<()> {
        let thing = self.things.get_mut(&id).ok_or(CoreError::ThingNotFound(id))?;
        thing.placement = Some(placement);
        thing.spawned = true;
        Ok(())
    }

    /// Remove a thing from the world entirely.
    pub fn remove_thing(&mut self, id: ThingId) -> CoreResult<Thing> {
        self.things.remove(&id).ok_or(CoreError::ThingNotFound(id))
    }

    /// Label of a thing, or a placeholder if it is unknown.
    pub fn thing_label(&self, id: ThingId) -> &str {
        self.things.get(&id).map(|t| t.label.as_str()).unwrap_or("<unknown>")
    }

    // -----------------------------------------------------------------------
    // Effects and sounds
    // -----------------------------------------------------------------------

    /// Attach a fresh instance of `def` to an actor.
    pub fn add_effect(&mut self, id: ActorId, def: &EffectDef) -> CoreResult<()> {
        let actor = self.actors.get_mut(&id).ok_or(CoreError::ActorNotFound(id))?;
        actor.effects.push(EffectInstance::from_def(def));
        Ok(())
    }

    /// Remove the first instance of the named effect. Returns whether one was removed.
    pub fn remove_effect(&mut self, id: ActorId, def: &str) -> CoreResult<bool> {
        let actor = self.actors.get_mut(&id).ok_or(CoreError::ActorNotFound(id))?;
        match actor.effects.iter().position(|e| e.def == def) {
            Some(index) => {
                actor.effects.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Grant a memory. Returns `false` if the actor has no mood subsystem.
    pub fn gain_memory(&mut self, id: ActorId, def: &MemoryDef) -> CoreResult<bool> {
        let actor = self.actors.get_mut(&id).ok_or(CoreError::ActorNotFound(id))?;
        match actor.memories.as_mut() {
            Some(bank) => {
                bank.gain(def);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Record a one-shot sound, dropping the oldest entries past the log limit.
    pub fn play_sound(&mut self, sound: &SoundDef, placement: Placement, volume: f32) {
        self.played.push(PlayedSound {
            tick: self.tick,
            sound: sound.name.clone(),
            placement,
            volume,
        });
        self.total_played += 1;
        if self.max_played > 0 && self.played.len() > self.max_played {
            let excess = self.played.len() - self.max_played;
            self.played.drain(..excess);
        }
    }

    /// Recently played sounds, oldest first.
    pub fn played_sounds(&self) -> &[PlayedSound] {
        &self.played
    }

    /// Number of sounds played since the world was created, including
    /// those dropped from the log.
    pub fn total_sounds_played(&self) -> u64 {
        self.total_played
    }

    /// Advance the host clock one tick: count down all effects and memories,
    /// dropping the ones that expired.
    pub fn tick_effects(&mut self) {
        self.tick += 1;
        for actor in self.actors.values_mut() {
            for effect in &mut actor.effects {
                effect.remaining_ticks = effect.remaining_ticks.saturating_sub(1);
            }
            actor.effects.retain(|e| e.remaining_ticks > 0);
            if let Some(bank) = actor.memories.as_mut() {
                bank.tick();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{MapId, Position, RaceClass};

    fn placement() -> Placement {
        Placement::new(MapId(0), Position::new(2, 2))
    }

    #[test]
    fn add_and_find_actor() {
        let mut world = World::new(FactionId(1));
        let id = world
            .add_actor(Actor::new("Mira", RaceClass::Humanlike))
            .unwrap();
        assert_eq!(world.find_actor_by_name("MIRA").unwrap().id, id);
        assert_eq!(world.actor_name(id), "Mira");
    }

    #[test]
    fn duplicate_actor_name_rejected() {
        let mut world = World::new(FactionId(1));
        world
            .add_actor(Actor::new("Mira", RaceClass::Humanlike))
            .unwrap();
        let err = world
            .add_actor(Actor::new("mira", RaceClass::Humanlike))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateName(_)));
    }

    #[test]
    fn remove_actor_clears_name_index() {
        let mut world = World::new(FactionId(1));
        let id = world
            .add_actor(Actor::new("Mira", RaceClass::Humanlike))
            .unwrap();
        world.remove_actor(id).unwrap();
        assert!(world.find_actor_by_name("Mira").is_none());
        assert!(matches!(
            world.remove_actor(id),
            Err(CoreError::ActorNotFound(_))
        ));
    }

    #[test]
    fn effects_count_down_and_expire() {
        let mut world = World::new(FactionId(1));
        let id = world
            .add_actor(Actor::new("Mira", RaceClass::Humanlike))
            .unwrap();
        world.add_effect(id, &EffectDef::new("Comfort", 2)).unwrap();

        world.tick_effects();
        assert_eq!(
            world.get_actor(id).unwrap().effect("Comfort").unwrap().remaining_ticks,
            1
        );
        world.tick_effects();
        assert!(world.get_actor(id).unwrap().effect("Comfort").is_none());
        assert_eq!(world.tick(), 2);
    }

    #[test]
    fn remove_effect_reports_presence() {
        let mut world = World::new(FactionId(1));
        let id = world
            .add_actor(Actor::new("Mira", RaceClass::Humanlike))
            .unwrap();
        assert!(!world.remove_effect(id, "Comfort").unwrap());
        world.add_effect(id, &EffectDef::new("Comfort", 5)).unwrap();
        assert!(world.remove_effect(id, "Comfort").unwrap());
    }

    #[test]
    fn gain_memory_needs_mood_subsystem() {
        let mut world = World::new(FactionId(1));
        let human = world
            .add_actor(Actor::new("Mira", RaceClass::Humanlike))
            .unwrap();
        let cat = world
            .add_actor(Actor::new("Tabby", RaceClass::Animal))
            .unwrap();
        let def = MemoryDef::new("Cozy", 4.0, 100);
        assert!(world.gain_memory(human, &def).unwrap());
        assert!(!world.gain_memory(cat, &def).unwrap());
    }

    #[test]
    fn things_spawn_and_despawn() {
        let mut world = World::new(FactionId(1));
        let id = world.add_thing(Thing::new("Plush")).unwrap();
        assert!(world.get_thing(id).unwrap().active_placement().is_none());

        world.spawn_thing(id, placement()).unwrap();
        assert_eq!(
            world.get_thing(id).unwrap().active_placement(),
            Some(placement())
        );

        world.despawn_thing(id).unwrap();
        assert!(world.get_thing(id).unwrap().active_placement().is_none());
        assert_eq!(world.thing_label(id), "Plush");
    }

    #[test]
    fn played_sounds_record_tick() {
        let mut world = World::new(FactionId(1));
        world.tick_effects();
        world.play_sound(&SoundDef::new("Chirp"), placement(), 0.4);
        let played = world.played_sounds();
        assert_eq!(played.len(), 1);
        assert_eq!(played[0].tick, 1);
        assert_eq!(played[0].sound, "Chirp");
    }

    #[test]
    fn duplicate_thing_id_is_reported_by_id() {
        let mut world = World::new(FactionId(1));
        let id = ThingId::from_u128(7);
        world.add_thing(Thing::with_id(id, "Plush")).unwrap();
        let err = world
            .add_thing(Thing::with_id(id, "Other Plush"))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateThing(dup) if dup == id));
        assert_eq!(world.thing_label(id), "Plush");
    }

    #[test]
    fn played_sound_log_drops_oldest_past_limit() {
        let mut world = World::new(FactionId(1)).with_sound_log_limit(2);
        for name in ["A", "B", "C"] {
            world.play_sound(&SoundDef::new(name), placement(), 0.4);
        }
        let names: Vec<_> = world.played_sounds().iter().map(|p| p.sound.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
        assert_eq!(world.total_sounds_played(), 3);
    }

    #[test]
    fn played_sound_log_is_capped_by_default() {
        let mut world = World::new(FactionId(1));
        for _ in 0..DEFAULT_SOUND_LOG_LIMIT + 5 {
            world.play_sound(&SoundDef::new("Chirp"), placement(), 0.4);
        }
        assert_eq!(world.played_sounds().len(), DEFAULT_SOUND_LOG_LIMIT);
        assert_eq!(world.total_sounds_played(), DEFAULT_SOUND_LOG_LIMIT as u64 + 5);
    }
}
