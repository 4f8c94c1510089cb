//! Escalating-chance comfort trigger for Plush.
//!
//! A [`TriggerComponent`] sits on a host object and, every `tick_interval`
//! ticks, rolls against a chance that climbs after each miss. A hit plays a
//! random custom sound at the object, buffs every eligible colonist on the
//! same map, resets the chance and starts a cooldown. The host engine is
//! reached only through the [`Host`] trait; [`Simulation`] drives triggers
//! against the in-memory [`plush_core::World`].

/// Roll evaluation and chance escalation.
pub mod chance;
/// Interval and cooldown countdown.
pub mod clock;
/// Per-component defaults and simulation configuration.
pub mod config;
/// The trigger component itself.
pub mod component;
/// Mutable context passed to components each tick.
pub mod context;
/// Sound and buff side effects of a successful roll.
pub mod dispatch;
/// Error types for the trigger crate.
pub mod error;
/// Trigger event types and the event log.
pub mod event;
/// The host engine seam.
pub mod host;
/// Save files for trigger state.
pub mod persist;
/// The process-wide custom sound registry.
pub mod registry;
/// Injectable sources of randomness.
pub mod sampler;
/// User settings and the layered config resolver.
pub mod settings;
/// Driver loop over an in-memory world.
pub mod simulation;
/// Per-component mutable state and its inspect text.
pub mod state;

/// Re-exports of [`chance::Roll`] and [`chance::roll_once`].
pub use chance::{Roll, roll_once};
/// Re-export of [`component::TriggerComponent`].
pub use component::TriggerComponent;
/// Re-exports of [`config::SimConfig`], [`config::TriggerProps`], and [`config::TICKS_PER_SECOND`].
pub use config::{SimConfig, TICKS_PER_SECOND, TriggerProps};
/// Re-export of [`context::TickContext`].
pub use context::TickContext;
/// Re-exports of the dispatch outcome types.
pub use dispatch::{BuffReport, DispatchReport, SoundChoice, VOLUME_FACTOR};
/// Re-exports of the error types.
pub use error::{DispatchError, TriggerError, TriggerResult};
/// Re-exports of [`event::EventLog`], [`event::TriggerEvent`], and [`event::TriggerEventKind`].
pub use event::{EventLog, TriggerEvent, TriggerEventKind};
/// Re-exports of [`host::Host`] and [`host::ActorProfile`].
pub use host::{ActorProfile, Host};
/// Re-exports of the save file types.
pub use persist::{SAVE_VERSION, SaveFile, TriggerRecord, TriggerSave};
/// Re-export of [`registry::SoundRegistry`].
pub use registry::SoundRegistry;
/// Re-exports of the sampler trait and implementations.
pub use sampler::{RngSampler, ScriptedSampler, UniformSampler};
/// Re-exports of the settings types.
pub use settings::{ConfigResolver, SettingsStore, TriggerSettings};
/// Re-export of [`simulation::Simulation`].
pub use simulation::Simulation;
/// Re-export of [`state::TriggerState`].
pub use state::TriggerState;
