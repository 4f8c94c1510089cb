//! Side effects of a successful roll: one sound and a round of buffs.
//!
//! Both halves tolerate missing resources. A missing sound or memory only
//! skips that piece; a missing primary buff effect aborts the buff half for
//! everyone so no actor ends up half-buffed.

use plush_core::{MapId, Placement, SoundDef};
use tracing::{debug, error, info, warn};

use crate::config::TriggerProps;
use crate::error::DispatchError;
use crate::host::Host;
use crate::registry::SoundRegistry;
use crate::sampler::UniformSampler;

/// Playback volume relative to nominal.
pub const VOLUME_FACTOR: f32 = 0.4;

/// Which sound, if any, was played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundChoice {
    /// A sound from the registry.
    Registered(String),
    /// The registry was empty and the named fallback was played.
    Fallback(String),
    /// Nothing could be resolved; nothing was played.
    Silent,
}

impl SoundChoice {
    /// Name of the sound played, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Registered(name) | Self::Fallback(name) => Some(name),
            Self::Silent => None,
        }
    }
}

/// Outcome of the buff half.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuffReport {
    /// Actors that received a fresh buff.
    pub buffed: usize,
    /// Of those, how many also gained the mood memory.
    pub memories: usize,
    /// Buffs that replaced an existing instance.
    pub refreshed: usize,
}

/// Everything a dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// The sound half.
    pub sound: SoundChoice,
    /// The buff half, or why it was abandoned.
    pub buffs: Result<BuffReport, DispatchError>,
}

/// Run both halves for a trigger sitting at `placement`.
pub fn dispatch(
    host: &mut dyn Host,
    registry: &SoundRegistry,
    props: &TriggerProps,
    placement: Placement,
    sampler: &mut dyn UniformSampler,
) -> DispatchReport {
    let sound = play_random_sound(host, registry, &props.fallback_sound, placement, sampler);
    let buffs = apply_buffs(host, placement.map, props);
    if let Err(ref e) = buffs {
        error!(error = %e, "buff dispatch aborted");
    }
    DispatchReport { sound, buffs }
}

/// Pick a registered sound uniformly at random, or fall back to the named
/// sound, and play it at `placement` with [`VOLUME_FACTOR`].
pub fn play_random_sound(
    host: &mut dyn Host,
    registry: &SoundRegistry,
    fallback: &str,
    placement: Placement,
    sampler: &mut dyn UniformSampler,
) -> SoundChoice {
    let registered = registry.sounds(&*host);
    let picked = if registered.is_empty() {
        None
    } else {
        let name = &registered[sampler.pick_index(registered.len())];
        host.find_sound(name)
            .map(|def| (def, SoundChoice::Registered(name.clone())))
    };

    let (def, choice) = match picked {
        Some(found) => found,
        None => match host.find_sound(fallback) {
            Some(def) => {
                warn!(sound = fallback, "using fallback sound");
                (def, SoundChoice::Fallback(fallback.to_string()))
            }
            None => {
                warn!(sound = fallback, "fallback sound not found, no sound will be played");
                return SoundChoice::Silent;
            }
        },
    };

    play(host, &def, placement);
    choice
}

fn play(host: &mut dyn Host, def: &SoundDef, placement: Placement) {
    host.play_one_shot(def, placement, VOLUME_FACTOR);
}

/// Apply the buff (and, where possible, the memory) to every eligible actor
/// on `map`. An existing buff is removed before the fresh one is added so
/// its duration restarts instead of stacking.
pub fn apply_buffs(
    host: &mut dyn Host,
    map: MapId,
    props: &TriggerProps,
) -> Result<BuffReport, DispatchError> {
    let effect = host
        .find_effect(&props.buff_effect)
        .ok_or_else(|| DispatchError::MissingBuffEffect(props.buff_effect.clone()))?;
    let memory = host.find_memory(&props.buff_memory);
    if memory.is_none() {
        warn!(memory = %props.buff_memory, "buff memory not found, skipping mood bonus");
    }

    let player = host.player_faction();
    let mut report = BuffReport::default();

    for actor in host.actors_on_map(map) {
        let Some(profile) = host.actor_profile(actor) else {
            continue;
        };
        if !profile.is_eligible(player) {
            continue;
        }

        if host.has_effect(actor, &effect.name) {
            host.remove_effect(actor, &effect.name);
            report.refreshed += 1;
        }
        host.add_effect(actor, &effect);

        if let Some(ref memory) = memory {
            if profile.has_mood && host.gain_memory(actor, memory) {
                report.memories += 1;
            }
        }

        debug!(actor = %host.actor_name(actor), "buffed");
        report.buffed += 1;
    }

    if report.buffed > 0 {
        info!(actors = report.buffed, "applied buff");
    }
    Ok(report)
}
