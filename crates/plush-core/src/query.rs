use crate::actor::{Actor, FactionId, MapId, RaceClass};
use crate::world::World;

/// A builder for filtering actors in a world.
pub struct ActorQuery<'w> {
    world: &'w World,
    map: Option<MapId>,
    faction: Option<FactionId>,
    race: Option<RaceClass>,
    alive_only: bool,
    spawned_only: bool,
}

impl<'w> ActorQuery<'w> {
    /// Start a query matching every actor in `world`.
    pub fn new(world: &'w World) -> Self {
        Self {
            world,
            map: None,
            faction: None,
            race: None,
            alive_only: false,
            spawned_only: false,
        }
    }

    /// Only actors spawned on this map.
    pub fn on_map(mut self, map: MapId) -> Self {
        self.map = Some(map);
        self
    }

    /// Only actors of this faction.
    pub fn faction(mut self, faction: FactionId) -> Self {
        self.faction = Some(faction);
        self
    }

    /// Only actors of this race class.
    pub fn race(mut self, race: RaceClass) -> Self {
        self.race = Some(race);
        self
    }

    /// Skip dead actors.
    pub fn alive(mut self) -> Self {
        self.alive_only = true;
        self
    }

    /// Skip actors that are not currently spawned.
    pub fn spawned(mut self) -> Self {
        self.spawned_only = true;
        self
    }

    /// Execute the query, returning matches sorted by name.
    pub fn execute(self) -> Vec<&'w Actor> {
        let mut results: Vec<&Actor> = self
            .world
            .all_actors()
            .filter(|a| self.matches(a))
            .collect();

        // Sort by name for deterministic output
        results.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        results
    }

    /// Count matching actors without collecting them.
    pub fn count(self) -> usize {
        self.world.all_actors().filter(|a| self.matches(a)).count()
    }

    fn matches(&self, actor: &Actor) -> bool {
        if let Some(map) = self.map {
            if actor.map() != Some(map) {
                return false;
            }
        }

        if let Some(faction) = self.faction {
            if actor.faction != Some(faction) {
                return false;
            }
        }

        if let Some(race) = self.race {
            if actor.race != race {
                return false;
            }
        }

        if self.alive_only && !actor.alive {
            return false;
        }

        if self.spawned_only && !actor.spawned {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use crate::actor::{Actor, FactionId, MapId, Placement, Position, RaceClass};
    use crate::world::World;

    const PLAYER: FactionId = FactionId(1);

    fn test_world() -> World {
        let mut world = World::new(PLAYER);
        let home = Placement::new(MapId(0), Position::new(0, 0));
        let away = Placement::new(MapId(1), Position::new(0, 0));

        world
            .add_actor(
                Actor::new("Mira", RaceClass::Humanlike)
                    .with_faction(PLAYER)
                    .spawned_at(home),
            )
            .unwrap();
        world
            .add_actor(
                Actor::new("Oskar", RaceClass::Humanlike)
                    .with_faction(PLAYER)
                    .spawned_at(away),
            )
            .unwrap();
        world
            .add_actor(
                Actor::new("Tabby", RaceClass::Animal)
                    .with_faction(PLAYER)
                    .spawned_at(home),
            )
            .unwrap();
        world
            .add_actor(
                Actor::new("Raider", RaceClass::Humanlike)
                    .with_faction(FactionId(9))
                    .spawned_at(home),
            )
            .unwrap();
        world
    }

    #[test]
    fn query_by_map() {
        let world = test_world();
        assert_eq!(world.query().on_map(MapId(0)).count(), 3);
        assert_eq!(world.query().on_map(MapId(1)).count(), 1);
    }

    #[test]
    fn query_by_faction_and_race() {
        let world = test_world();
        let results = world
            .query()
            .faction(PLAYER)
            .race(RaceClass::Humanlike)
            .execute();
        let names: Vec<_> = results.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Mira", "Oskar"]);
    }

    #[test]
    fn query_alive_skips_dead() {
        let mut world = test_world();
        let mira = world.find_actor_by_name("mira").unwrap().id;
        world.kill_actor(mira).unwrap();
        assert_eq!(world.query().alive().faction(PLAYER).count(), 2);
    }

    #[test]
    fn query_spawned_skips_despawned() {
        let mut world = test_world();
        let oskar = world.find_actor_by_name("oskar").unwrap().id;
        world.despawn_actor(oskar).unwrap();
        assert_eq!(world.query().spawned().faction(PLAYER).count(), 2);
        let names: Vec<_> = world
            .query()
            .spawned()
            .execute()
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["Mira", "Raider", "Tabby"]);
    }
}
