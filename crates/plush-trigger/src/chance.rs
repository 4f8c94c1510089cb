use tracing::debug;

use crate::sampler::UniformSampler;
use crate::settings::ConfigResolver;
use crate::state::TriggerState;

/// The result of one roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roll {
    /// Chance in effect when the roll was made.
    pub chance: f32,
    /// The uniform draw compared against it.
    pub draw: f32,
    /// `draw < chance`.
    pub success: bool,
}

/// Roll once against the current chance and update the state.
///
/// On success `on_success` runs first, with the sampler, and only then is
/// the chance reset to the effective base chance and the cooldown started.
/// On failure the effective increment is added (capped at 1.0) when chance
/// increase is enabled; otherwise the chance is left alone.
pub fn roll_once<F>(
    state: &mut TriggerState,
    config: &ConfigResolver,
    sampler: &mut dyn UniformSampler,
    on_success: F,
) -> Roll
where
    F: FnOnce(&mut dyn UniformSampler),
{
    let chance = state.current_chance;
    let draw = sampler.next_unit();
    let success = draw < chance;
    debug!(chance, draw, success, "rolled trigger");

    if success {
        on_success(sampler);
        apply_success(state, config);
    } else {
        apply_failure(state, config);
    }

    Roll {
        chance,
        draw,
        success,
    }
}

/// Reset after a success. The base chance is resolved now, not at spawn.
pub fn apply_success(state: &mut TriggerState, config: &ConfigResolver) {
    state.current_chance = config.base_chance().clamp(0.0, 1.0);
    state.cooldown_counter = config.sound_cooldown_ticks();
}

/// Escalate after a failure, if enabled.
pub fn apply_failure(state: &mut TriggerState, config: &ConfigResolver) {
    if config.chance_increase_enabled() {
        state.current_chance = (state.current_chance + config.chance_increment()).clamp(0.0, 1.0);
    }
}
