use plush_core::ThingId;

/// What kind of trigger event occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerEventKind {
    /// A roll was made.
    Rolled {
        /// The trigger's host object.
        thing: ThingId,
        /// Chance in effect.
        chance: f32,
        /// The draw compared against it.
        draw: f32,
        /// Whether the roll succeeded.
        success: bool,
    },
    /// A sound was played.
    SoundPlayed {
        /// The trigger's host object.
        thing: ThingId,
        /// Name of the sound.
        sound: String,
        /// Whether it was the fallback sound.
        fallback: bool,
    },
    /// A success produced no sound because none could be resolved.
    SoundSkipped {
        /// The trigger's host object.
        thing: ThingId,
    },
    /// Buffs were handed out.
    BuffApplied {
        /// The trigger's host object.
        thing: ThingId,
        /// Number of actors buffed.
        actors: usize,
        /// Number of those who also gained the memory.
        memories: usize,
    },
    /// The buff half was abandoned.
    DispatchAborted {
        /// The trigger's host object.
        thing: ThingId,
        /// Why.
        reason: String,
    },
}

impl TriggerEventKind {
    /// The host object this event concerns.
    pub fn thing(&self) -> ThingId {
        match self {
            Self::Rolled { thing, .. }
            | Self::SoundPlayed { thing, .. }
            | Self::SoundSkipped { thing }
            | Self::BuffApplied { thing, .. }
            | Self::DispatchAborted { thing, .. } => *thing,
        }
    }

    /// Whether this is a successful roll.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Rolled { success: true, .. })
    }
}

/// A record of something a trigger did.
#[derive(Debug, Clone)]
pub struct TriggerEvent {
    /// The host tick when this event occurred.
    pub tick: u64,
    /// The specific kind of event that occurred.
    pub kind: TriggerEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl TriggerEvent {
    /// Create a new event with the given tick, kind, and description.
    pub fn new(tick: u64, kind: TriggerEventKind, description: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            description: description.into(),
        }
    }
}

/// Accumulates events during a simulation run.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<TriggerEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: TriggerEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[TriggerEvent] {
        &self.events
    }

    /// Return all events that occurred at the given tick.
    pub fn events_at_tick(&self, tick: u64) -> Vec<&TriggerEvent> {
        self.events.iter().filter(|e| e.tick == tick).collect()
    }

    /// Return all events concerning the given host object.
    pub fn events_for_thing(&self, thing: ThingId) -> Vec<&TriggerEvent> {
        self.events.iter().filter(|e| e.kind.thing() == thing).collect()
    }

    /// Number of successful rolls recorded.
    pub fn successes(&self) -> usize {
        self.events.iter().filter(|e| e.kind.is_success()).count()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
