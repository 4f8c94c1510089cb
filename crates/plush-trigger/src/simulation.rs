use std::sync::Arc;

use plush_core::{Thing, ThingId, World};
use tracing::{info, warn};

use crate::component::TriggerComponent;
use crate::config::{SimConfig, TriggerProps};
use crate::context::TickContext;
use crate::error::{TriggerError, TriggerResult};
use crate::event::EventLog;
use crate::persist::{SaveFile, TriggerRecord};
use crate::registry::SoundRegistry;
use crate::sampler::RngSampler;
use crate::settings::{ConfigResolver, SettingsStore};

/// Drives trigger components against an in-memory [`World`].
///
/// Owns the world, the seeded sampler, the event log, the shared sound
/// registry and settings store, and every attached trigger. Each tick first
/// advances the world's effect timers, then ticks every trigger once in the
/// order they were added.
pub struct Simulation {
    world: World,
    sampler: RngSampler,
    events: EventLog,
    registry: Arc<SoundRegistry>,
    settings: SettingsStore,
    triggers: Vec<TriggerComponent>,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.world.tick())
            .field("triggers", &self.triggers.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Simulation {
    /// Create a new simulation from a world and configuration. No settings
    /// are registered, so triggers run on their component defaults.
    pub fn new(world: World, config: SimConfig) -> Self {
        Self {
            world,
            sampler: RngSampler::seeded(config.seed),
            events: EventLog::new(config.max_events),
            registry: Arc::new(SoundRegistry::new(config.sound_prefix)),
            settings: SettingsStore::empty(),
            triggers: Vec::new(),
        }
    }

    /// Use `settings` as the live settings store for every trigger added
    /// afterwards.
    pub fn with_settings(mut self, settings: SettingsStore) -> Self {
        self.settings = settings;
        self
    }

    /// Handle to the live settings store. Changes are seen by the next tick.
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// The shared sound registry.
    pub fn registry(&self) -> &SoundRegistry {
        &self.registry
    }

    /// Attach a trigger to an existing thing and run its spawn setup.
    pub fn add_trigger(&mut self, thing: ThingId, props: TriggerProps) -> TriggerResult<()> {
        props.validate()?;
        if self.world.get_thing(thing).is_none() {
            return Err(TriggerError::ThingNotFound(thing));
        }

        let config = ConfigResolver::new(props, self.settings.clone());
        let mut component = TriggerComponent::new(thing, config, Arc::clone(&self.registry));
        component.post_spawn_setup(&self.world);
        info!(thing = %thing, label = self.world.thing_label(thing), "attached trigger");
        self.triggers.push(component);
        Ok(())
    }

    /// Add `thing` to the world and attach a trigger to it.
    pub fn spawn_trigger(&mut self, thing: Thing, props: TriggerProps) -> TriggerResult<ThingId> {
        props.validate()?;
        let id = self.world.add_thing(thing)?;
        self.add_trigger(id, props)?;
        Ok(id)
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) {
        self.world.tick_effects();
        let tick = self.world.tick();

        for trigger in &mut self.triggers {
            let mut ctx = TickContext {
                host: &mut self.world,
                sampler: &mut self.sampler,
                events: &mut self.events,
                tick,
            };
            trigger.tick(&mut ctx);
        }
    }

    /// Advance the simulation by `n` ticks.
    pub fn run(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn triggers(&self) -> &[TriggerComponent] {
        &self.triggers
    }

    /// The trigger attached to `thing`, if any.
    pub fn trigger(&self, thing: ThingId) -> Option<&TriggerComponent> {
        self.triggers.iter().find(|t| t.thing() == thing)
    }

    /// Capture every trigger's persisted fields.
    pub fn save_state(&self) -> SaveFile {
        let mut save = SaveFile::new(self.world.tick());
        save.triggers = self
            .triggers
            .iter()
            .map(|t| TriggerRecord {
                thing: t.thing(),
                state: t.save(),
            })
            .collect();
        save
    }

    /// Restore trigger state from a save. Records for things without a
    /// trigger are skipped. Returns how many triggers were restored.
    pub fn load_state(&mut self, save: &SaveFile) -> usize {
        let mut restored = 0;
        for record in &save.triggers {
            match self.triggers.iter_mut().find(|t| t.thing() == record.thing) {
                Some(trigger) => {
                    trigger.load(record.state);
                    restored += 1;
                }
                None => warn!(thing = %record.thing, "no trigger for saved record, skipping"),
            }
        }
        info!(restored, saved_tick = save.tick, "loaded trigger state");
        restored
    }

    /// Inspect text for every trigger, labelled by its thing.
    pub fn status_strings(&self) -> Vec<(String, String)> {
        self.triggers
            .iter()
            .map(|t| {
                (
                    self.world.thing_label(t.thing()).to_string(),
                    t.status_string(),
                )
            })
            .collect()
    }
}
