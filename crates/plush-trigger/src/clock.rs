use crate::state::TriggerState;

/// What one clock step decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStep {
    /// Cooldown consumed this tick; nothing else happened.
    CoolingDown,
    /// The interval is still running.
    Waiting,
    /// The interval elapsed and the counter was reset. Roll now.
    Elapsed,
}

/// Advance the trigger clock by one host tick.
///
/// While cooling down only the cooldown counter moves. Otherwise the tick
/// counter advances and is reset to zero once it reaches `tick_interval`.
pub fn advance(state: &mut TriggerState, tick_interval: u32) -> ClockStep {
    if state.cooldown_counter > 0 {
        state.cooldown_counter -= 1;
        return ClockStep::CoolingDown;
    }

    state.tick_counter += 1;
    if state.tick_counter >= tick_interval {
        state.tick_counter = 0;
        ClockStep::Elapsed
    } else {
        ClockStep::Waiting
    }
}
