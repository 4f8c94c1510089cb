use crate::event::{EventLog, TriggerEvent, TriggerEventKind};
use crate::host::Host;
use crate::sampler::UniformSampler;

/// Mutable context passed to each component during a tick.
pub struct TickContext<'a> {
    /// The engine the component lives in.
    pub host: &'a mut dyn Host,
    /// Source of random draws.
    pub sampler: &'a mut dyn UniformSampler,
    /// Where components record what they did.
    pub events: &'a mut EventLog,
    /// Current host tick.
    pub tick: u64,
}

impl TickContext<'_> {
    /// Emit a trigger event at the current tick.
    pub fn emit(&mut self, kind: TriggerEventKind, description: impl Into<String>) {
        self.events
            .push(TriggerEvent::new(self.tick, kind, description));
    }
}
