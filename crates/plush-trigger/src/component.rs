use std::sync::Arc;

use plush_core::{Placement, ThingId};
use tracing::debug;

use crate::chance::{self, Roll};
use crate::clock::{self, ClockStep};
use crate::context::TickContext;
use crate::dispatch::{self, DispatchReport, SoundChoice};
use crate::event::TriggerEventKind;
use crate::host::Host;
use crate::persist::TriggerSave;
use crate::registry::SoundRegistry;
use crate::settings::ConfigResolver;
use crate::state::TriggerState;

/// The trigger attached to one host object.
///
/// Ticked once per host tick. Counts down the interval, rolls when it
/// elapses, and on success plays a sound and buffs the colony before
/// resetting into a cooldown.
#[derive(Debug)]
pub struct TriggerComponent {
    thing: ThingId,
    config: ConfigResolver,
    registry: Arc<SoundRegistry>,
    state: TriggerState,
}

impl TriggerComponent {
    /// Attach a trigger to `thing`. State starts at the zero sentinel until
    /// [`TriggerComponent::post_spawn_setup`] runs.
    pub fn new(thing: ThingId, config: ConfigResolver, registry: Arc<SoundRegistry>) -> Self {
        Self {
            thing,
            config,
            registry,
            state: TriggerState::default(),
        }
    }

    /// The host object this trigger belongs to.
    pub fn thing(&self) -> ThingId {
        self.thing
    }

    /// Current state.
    pub fn state(&self) -> &TriggerState {
        &self.state
    }

    /// Overwrite the state, e.g. from a host's own persistence.
    pub fn set_state(&mut self, state: TriggerState) {
        self.state = state;
    }

    /// The resolver this trigger reads its configuration from.
    pub fn config(&self) -> &ConfigResolver {
        &self.config
    }

    /// Spawn hook: seed the chance from the effective base the first time
    /// the component is seen, and make sure the shared registry is built.
    pub fn post_spawn_setup(&mut self, host: &dyn Host) {
        if self.state.current_chance == 0.0 {
            self.state.current_chance = self.config.base_chance();
        }
        if !self.registry.is_initialized() {
            self.registry.sounds(host);
        }
    }

    /// Advance by one host tick.
    ///
    /// Does nothing while the host object is not spawned on a map.
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) {
        let Some(placement) = ctx.host.placement(self.thing) else {
            return;
        };

        if clock::advance(&mut self.state, self.config.tick_interval()) == ClockStep::Elapsed {
            self.try_trigger(ctx, placement);
        }
    }

    fn try_trigger(&mut self, ctx: &mut TickContext<'_>, placement: Placement) {
        let mut report: Option<DispatchReport> = None;
        let registry = &self.registry;
        let props = self.config.props();
        let host = &mut *ctx.host;

        let roll = chance::roll_once(
            &mut self.state,
            &self.config,
            &mut *ctx.sampler,
            |sampler| {
                report = Some(dispatch::dispatch(host, registry, props, placement, sampler));
            },
        );

        self.record(ctx, roll, report);
    }

    fn record(&self, ctx: &mut TickContext<'_>, roll: Roll, report: Option<DispatchReport>) {
        let thing = self.thing;
        let description = if roll.success {
            format!(
                "roll succeeded ({:.3} < {:.1}%)",
                roll.draw,
                roll.chance * 100.0
            )
        } else {
            format!(
                "roll failed ({:.3} >= {:.1}%), chance now {:.1}%",
                roll.draw,
                roll.chance * 100.0,
                self.state.current_chance * 100.0
            )
        };
        ctx.emit(
            TriggerEventKind::Rolled {
                thing,
                chance: roll.chance,
                draw: roll.draw,
                success: roll.success,
            },
            description,
        );

        let Some(report) = report else {
            return;
        };

        match report.sound {
            SoundChoice::Registered(sound) => ctx.emit(
                TriggerEventKind::SoundPlayed {
                    thing,
                    sound: sound.clone(),
                    fallback: false,
                },
                format!("played {sound}"),
            ),
            SoundChoice::Fallback(sound) => ctx.emit(
                TriggerEventKind::SoundPlayed {
                    thing,
                    sound: sound.clone(),
                    fallback: true,
                },
                format!("played fallback {sound}"),
            ),
            SoundChoice::Silent => ctx.emit(
                TriggerEventKind::SoundSkipped { thing },
                "no sound available",
            ),
        }

        match report.buffs {
            Ok(buffs) => ctx.emit(
                TriggerEventKind::BuffApplied {
                    thing,
                    actors: buffs.buffed,
                    memories: buffs.memories,
                },
                format!("buffed {} colonist(s)", buffs.buffed),
            ),
            Err(e) => ctx.emit(
                TriggerEventKind::DispatchAborted {
                    thing,
                    reason: e.to_string(),
                },
                format!("buffs aborted: {e}"),
            ),
        }

        debug!(thing = %thing, cooldown = self.state.cooldown_counter, "trigger entered cooldown");
    }

    /// Fields to persist.
    pub fn save(&self) -> TriggerSave {
        TriggerSave::from_state(&self.state)
    }

    /// Restore persisted fields. A missing chance becomes the effective base.
    pub fn load(&mut self, save: TriggerSave) {
        self.state = save.into_state(self.config.base_chance());
    }

    /// Inspect-pane text.
    pub fn status_string(&self) -> String {
        self.state.status_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TriggerProps;
    use crate::event::EventLog;
    use crate::sampler::{ScriptedSampler, UniformSampler};
    use crate::settings::{SettingsStore, TriggerSettings};
    use plush_core::{
        Actor, EffectDef, FactionId, MapId, MemoryDef, Position, RaceClass, SoundDef, Thing, World,
    };

    const PLAYER: FactionId = FactionId(1);

    fn spot() -> Placement {
        Placement::new(MapId(0), Position::new(4, 4))
    }

    fn colony() -> (World, ThingId) {
        let mut world = World::new(PLAYER);
        world.defs_mut().add_sound(SoundDef::new("Plush_Purr"));
        world
            .defs_mut()
            .add_effect(EffectDef::new("PlushComfort", 2500));
        world
            .defs_mut()
            .add_memory(MemoryDef::new("PlushComfortMemory", 5.0, 6000));
        world
            .add_actor(
                Actor::new("Mira", RaceClass::Humanlike)
                    .with_faction(PLAYER)
                    .spawned_at(spot()),
            )
            .unwrap();
        let thing = world
            .add_thing(Thing::new("Plush").spawned_at(spot()))
            .unwrap();
        (world, thing)
    }

    fn component(thing: ThingId, props: TriggerProps, settings: SettingsStore) -> TriggerComponent {
        TriggerComponent::new(
            thing,
            ConfigResolver::new(props, settings),
            Arc::new(SoundRegistry::new("Plush_")),
        )
    }

    fn run(
        component: &mut TriggerComponent,
        world: &mut World,
        sampler: &mut dyn UniformSampler,
        events: &mut EventLog,
        ticks: u64,
    ) {
        for tick in 0..ticks {
            let mut ctx = TickContext {
                host: &mut *world,
                sampler: &mut *sampler,
                events: &mut *events,
                tick,
            };
            component.tick(&mut ctx);
        }
    }

    #[test]
    fn spawn_setup_seeds_chance_from_base() {
        let (world, thing) = colony();
        let settings = SettingsStore::with_settings(TriggerSettings {
            base_chance: 0.03,
            ..TriggerSettings::default()
        });
        let mut comp = component(thing, TriggerProps::default(), settings);
        comp.post_spawn_setup(&world);
        assert!((comp.state().current_chance - 0.03).abs() < f32::EPSILON);
    }

    #[test]
    fn spawn_setup_keeps_loaded_chance() {
        let (world, thing) = colony();
        let mut comp = component(thing, TriggerProps::default(), SettingsStore::empty());
        comp.set_state(TriggerState::with_chance(0.4));
        comp.post_spawn_setup(&world);
        assert!((comp.state().current_chance - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn spawn_setup_builds_registry() {
        let (world, thing) = colony();
        let registry = Arc::new(SoundRegistry::new("Plush_"));
        let mut comp = TriggerComponent::new(
            thing,
            ConfigResolver::new(TriggerProps::default(), SettingsStore::empty()),
            Arc::clone(&registry),
        );
        comp.post_spawn_setup(&world);
        assert_eq!(registry.built().map(<[String]>::len), Some(1));
    }

    #[test]
    fn five_failed_intervals() {
        let (mut world, thing) = colony();
        let props = TriggerProps::default().with_tick_interval(10);
        let mut comp = component(thing, props, SettingsStore::with_settings(TriggerSettings::default()));
        comp.post_spawn_setup(&world);
        let mut sampler = ScriptedSampler::new([0.5; 5]);
        let mut events = EventLog::new(0);

        run(&mut comp, &mut world, &mut sampler, &mut events, 50);

        assert!((comp.state().current_chance - 0.06).abs() < 1e-6);
        assert_eq!(comp.state().tick_counter, 0);
        assert_eq!(comp.state().cooldown_counter, 0);
        assert_eq!(events.len(), 5);
        assert_eq!(events.successes(), 0);
        assert!(world.played_sounds().is_empty());
    }

    #[test]
    fn success_plays_buffs_and_cools_down() {
        let (mut world, thing) = colony();
        let props = TriggerProps::default()
            .with_tick_interval(1)
            .with_cooldown_ticks(300);
        let mut comp = component(thing, props, SettingsStore::empty());
        comp.set_state(TriggerState::with_chance(0.5));
        let mut sampler = ScriptedSampler::new([0.3]);
        let mut events = EventLog::new(0);

        run(&mut comp, &mut world, &mut sampler, &mut events, 1);

        assert_eq!(events.successes(), 1);
        assert_eq!(world.played_sounds().len(), 1);
        assert!((comp.state().current_chance - 0.01).abs() < f32::EPSILON);
        assert_eq!(comp.state().cooldown_counter, 300);
        let mira = world.find_actor_by_name("Mira").unwrap();
        assert_eq!(mira.effect_count("PlushComfort"), 1);
    }

    #[test]
    fn cooldown_blocks_rolls() {
        let (mut world, thing) = colony();
        let props = TriggerProps::default()
            .with_tick_interval(1)
            .with_cooldown_ticks(5);
        let mut comp = component(thing, props, SettingsStore::empty());
        comp.set_state(TriggerState::with_chance(1.0));
        let mut sampler = ScriptedSampler::new([0.0]);
        let mut events = EventLog::new(0);

        // Success on tick 0, then five quiet ticks, then success again.
        run(&mut comp, &mut world, &mut sampler, &mut events, 7);

        let rolls: Vec<u64> = events
            .events()
            .iter()
            .filter(|e| matches!(e.kind, TriggerEventKind::Rolled { .. }))
            .map(|e| e.tick)
            .collect();
        assert_eq!(rolls, vec![0, 6]);
    }

    #[test]
    fn despawned_thing_is_inert() {
        let (mut world, thing) = colony();
        world.despawn_thing(thing).unwrap();
        let mut comp = component(
            thing,
            TriggerProps::default().with_tick_interval(1),
            SettingsStore::empty(),
        );
        comp.set_state(TriggerState {
            current_chance: 1.0,
            tick_counter: 0,
            cooldown_counter: 3,
        });
        let mut sampler = ScriptedSampler::new([0.0]);
        let mut events = EventLog::new(0);

        run(&mut comp, &mut world, &mut sampler, &mut events, 10);

        assert!(events.is_empty());
        assert_eq!(comp.state().cooldown_counter, 3);
        assert_eq!(comp.state().tick_counter, 0);
    }

    #[test]
    fn missing_buff_still_plays_sound_and_resets() {
        let mut world = World::new(PLAYER);
        world.defs_mut().add_sound(SoundDef::new("Cat_Meow"));
        let thing = world
            .add_thing(Thing::new("Plush").spawned_at(spot()))
            .unwrap();
        let mut comp = component(
            thing,
            TriggerProps::default().with_tick_interval(1),
            SettingsStore::empty(),
        );
        comp.set_state(TriggerState::with_chance(0.9));
        let mut sampler = ScriptedSampler::new([0.1]);
        let mut events = EventLog::new(0);

        run(&mut comp, &mut world, &mut sampler, &mut events, 1);

        assert_eq!(world.played_sounds()[0].sound, "Cat_Meow");
        assert!(events.events().iter().any(|e| matches!(
            e.kind,
            TriggerEventKind::DispatchAborted { .. }
        )));
        assert_eq!(comp.state().cooldown_counter, 300);
    }

    #[test]
    fn load_defaults_missing_chance_to_effective_base() {
        let (_, thing) = colony();
        let settings = SettingsStore::with_settings(TriggerSettings {
            base_chance: 0.02,
            ..TriggerSettings::default()
        });
        let mut comp = component(thing, TriggerProps::default(), settings);
        comp.load(TriggerSave {
            current_chance: None,
            tick_counter: 7,
            cooldown_counter: 2,
        });
        assert!((comp.state().current_chance - 0.02).abs() < f32::EPSILON);
        assert_eq!(comp.save().tick_counter, 7);
        assert_eq!(comp.save().cooldown_counter, 2);
    }

    #[test]
    fn status_string_reports_cooldown() {
        let (_, thing) = colony();
        let mut comp = component(thing, TriggerProps::default(), SettingsStore::empty());
        comp.set_state(TriggerState {
            current_chance: 0.01,
            tick_counter: 0,
            cooldown_counter: 120,
        });
        insta::assert_snapshot!(comp.status_string(), @r"
        Trigger chance: 1.0%
        Cooldown: 2.0s
        ");
    }
}
