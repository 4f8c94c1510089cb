pub mod inspect;
pub mod settings;
pub mod simulate;

use std::path::Path;

use plush_core::{
    Actor, EffectDef, FactionId, MapId, MemoryDef, Placement, Position, RaceClass, SoundDef,
    Thing, ThingId, World,
};
use plush_trigger::{SettingsStore, TriggerSettings};

/// Faction the demo player controls.
pub const PLAYER: FactionId = FactionId(1);
/// Faction of the visiting trader, who is never buffed.
const VISITORS: FactionId = FactionId(2);

/// The demo plush keeps the same id across runs so saves can be resumed.
pub const PLUSH_ID: ThingId = ThingId::from_u128(1);

const COLONIST_NAMES: &[&str] = &["Mira", "Oskar", "Ines", "Tomas", "Yara", "Bo", "Lene", "Kai"];
const ANIMAL_NAMES: &[&str] = &["Tabby", "Biscuit", "Pepper", "Moss"];

/// Build the demo colony: sound catalog, buff definitions, colonists,
/// animals, one visitor, and the plush itself.
pub fn demo_world(colonists: usize, animals: usize, with_sounds: bool) -> Result<World, String> {
    let mut world = World::new(PLAYER);
    let home = Placement::new(MapId(0), Position::new(12, 8));

    if with_sounds {
        for name in ["Plush_Squeak", "Plush_Purr", "Plush_Hum"] {
            world.defs_mut().add_sound(SoundDef::new(name));
        }
    }
    for name in ["Cat_Meow", "Door_Open"] {
        world.defs_mut().add_sound(SoundDef::new(name));
    }
    world
        .defs_mut()
        .add_effect(EffectDef::new("PlushComfort", 2500));
    world
        .defs_mut()
        .add_memory(MemoryDef::new("PlushComfortMemory", 5.0, 6000));

    for i in 0..colonists {
        let actor = Actor::new(numbered(COLONIST_NAMES, i), RaceClass::Humanlike)
            .with_faction(PLAYER)
            .spawned_at(home);
        world.add_actor(actor).map_err(|e| e.to_string())?;
    }
    for i in 0..animals {
        let actor = Actor::new(numbered(ANIMAL_NAMES, i), RaceClass::Animal)
            .with_faction(PLAYER)
            .spawned_at(home);
        world.add_actor(actor).map_err(|e| e.to_string())?;
    }
    let trader = Actor::new("Trader", RaceClass::Humanlike)
        .with_faction(VISITORS)
        .spawned_at(home);
    world.add_actor(trader).map_err(|e| e.to_string())?;

    Ok(world)
}

/// The demo plush, spawned next to the colonists.
pub fn demo_plush() -> Thing {
    Thing::with_id(PLUSH_ID, "Plush").spawned_at(Placement::new(MapId(0), Position::new(12, 9)))
}

fn numbered(names: &[&str], i: usize) -> String {
    let base = names[i % names.len()];
    match i / names.len() {
        0 => base.to_string(),
        round => format!("{base} {}", round + 1),
    }
}

/// Load a settings file into a live store. No file means an empty store.
pub fn load_settings(path: Option<&Path>) -> Result<SettingsStore, String> {
    match path {
        Some(path) => {
            let settings = TriggerSettings::load(path)
                .map_err(|e| format!("cannot read settings {}: {e}", path.display()))?;
            Ok(SettingsStore::with_settings(settings))
        }
        None => Ok(SettingsStore::empty()),
    }
}

/// Format a probability as a percentage.
pub fn percent(p: f32) -> String {
    format!("{:.1}%", p * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_names_stay_unique() {
        let names: Vec<_> = (0..10).map(|i| numbered(ANIMAL_NAMES, i)).collect();
        assert_eq!(names[0], "Tabby");
        assert_eq!(names[4], "Tabby 2");
        assert_eq!(names[9], "Biscuit 3");
    }

    #[test]
    fn demo_world_counts() {
        let world = demo_world(10, 2, true).unwrap();
        assert_eq!(world.query().race(RaceClass::Humanlike).count(), 11);
        assert_eq!(world.query().race(RaceClass::Animal).count(), 2);
        assert_eq!(world.defs().sounds().len(), 5);
    }

    #[test]
    fn demo_world_without_sounds_keeps_fallback() {
        let world = demo_world(1, 0, false).unwrap();
        assert!(world.defs().sound("Cat_Meow").is_some());
        assert!(world.defs().sound("Plush_Purr").is_none());
    }
}
