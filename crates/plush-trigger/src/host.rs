//! The seam between the trigger and the engine that runs it.
//!
//! Everything the trigger needs from outside (where its object sits, which
//! sounds and effects exist, who is around to receive a buff) goes through
//! [`Host`]. [`World`] is the in-memory implementation used by the CLI and
//! the tests.

use plush_core::{
    ActorId, EffectDef, FactionId, MapId, MemoryDef, Placement, RaceClass, SoundDef, ThingId,
    World,
};

/// What the trigger needs to know about an actor to decide eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorProfile {
    /// False once the actor has died.
    pub alive: bool,
    /// True while the actor is physically present on a map.
    pub spawned: bool,
    /// Owning faction, if any.
    pub faction: Option<FactionId>,
    /// Race capability class.
    pub race: RaceClass,
    /// Whether the actor can hold mood memories.
    pub has_mood: bool,
}

impl ActorProfile {
    /// Alive, spawned, owned by `player`, and humanlike.
    pub fn is_eligible(&self, player: FactionId) -> bool {
        self.alive && self.spawned && self.faction == Some(player) && self.race.is_humanlike()
    }
}

/// Host-provided queries and primitives.
pub trait Host {
    /// Where a thing currently sits. `None` when it is not spawned or has no map.
    fn placement(&self, thing: ThingId) -> Option<Placement>;

    /// Names of every sound resource, in catalog order.
    fn sound_names(&self) -> Vec<String>;

    /// Look up a sound by exact name.
    fn find_sound(&self, name: &str) -> Option<SoundDef>;

    /// Look up a status effect by exact name.
    fn find_effect(&self, name: &str) -> Option<EffectDef>;

    /// Look up a mood memory by exact name.
    fn find_memory(&self, name: &str) -> Option<MemoryDef>;

    /// Play a sound once, anchored at `placement`.
    fn play_one_shot(&mut self, sound: &SoundDef, placement: Placement, volume: f32);

    /// Every actor spawned on `map`.
    fn actors_on_map(&self, map: MapId) -> Vec<ActorId>;

    /// Eligibility facts for an actor. `None` if it no longer exists.
    fn actor_profile(&self, actor: ActorId) -> Option<ActorProfile>;

    /// The faction the player controls.
    fn player_faction(&self) -> FactionId;

    /// Whether the actor carries an instance of the named effect.
    fn has_effect(&self, actor: ActorId, effect: &str) -> bool;

    /// Remove one instance of the named effect, if present.
    fn remove_effect(&mut self, actor: ActorId, effect: &str);

    /// Attach a fresh instance of `effect`.
    fn add_effect(&mut self, actor: ActorId, effect: &EffectDef);

    /// Grant a mood memory. Returns `false` if the actor has no mood subsystem.
    fn gain_memory(&mut self, actor: ActorId, memory: &MemoryDef) -> bool;

    /// Display name of an actor, for diagnostics.
    fn actor_name(&self, actor: ActorId) -> String;
}

impl Host for World {
    fn placement(&self, thing: ThingId) -> Option<Placement> {
        self.get_thing(thing).and_then(|t| t.active_placement())
    }

    fn sound_names(&self) -> Vec<String> {
        self.defs().sounds().iter().map(|s| s.name.clone()).collect()
    }

    fn find_sound(&self, name: &str) -> Option<SoundDef> {
        self.defs().sound(name).cloned()
    }

    fn find_effect(&self, name: &str) -> Option<EffectDef> {
        self.defs().effect(name).cloned()
    }

    fn find_memory(&self, name: &str) -> Option<MemoryDef> {
        self.defs().memory(name).cloned()
    }

    fn play_one_shot(&mut self, sound: &SoundDef, placement: Placement, volume: f32) {
        self.play_sound(sound, placement, volume);
    }

    fn actors_on_map(&self, map: MapId) -> Vec<ActorId> {
        self.query().on_map(map).execute().iter().map(|a| a.id).collect()
    }

    fn actor_profile(&self, actor: ActorId) -> Option<ActorProfile> {
        self.get_actor(actor).map(|a| ActorProfile {
            alive: a.alive,
            spawned: a.spawned,
            faction: a.faction,
            race: a.race,
            has_mood: a.memories.is_some(),
        })
    }

    fn player_faction(&self) -> FactionId {
        World::player_faction(self)
    }

    fn has_effect(&self, actor: ActorId, effect: &str) -> bool {
        self.get_actor(actor)
            .is_some_and(|a| a.effect(effect).is_some())
    }

    fn remove_effect(&mut self, actor: ActorId, effect: &str) {
        let _ = World::remove_effect(self, actor, effect);
    }

    fn add_effect(&mut self, actor: ActorId, effect: &EffectDef) {
        let _ = World::add_effect(self, actor, effect);
    }

    fn gain_memory(&mut self, actor: ActorId, memory: &MemoryDef) -> bool {
        World::gain_memory(self, actor, memory).unwrap_or(false)
    }

    fn actor_name(&self, actor: ActorId) -> String {
        World::actor_name(self, actor).to_string()
    }
}
