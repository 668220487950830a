//! Game notifications
//!
//! The simulation queues events while a frame runs; the host drains the queue
//! once per frame with [`EventBus::dispatch`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::audio::SoundEffect;

/// Game events (for audio, HUD and the session host)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A sound should be played
    Sound(SoundEffect),
    /// Displayed distance changed [m]
    ScoreChanged(u32),
    /// Remaining time entered the warning range
    TimeCaution,
    /// Remaining time left the warning range
    TimeCautionCancel,
    /// Player crashed into an obstacle
    Miss,
    /// Player started the recovery animation after a crash
    PcReturnStarted,
    /// Time is up; carries the final distance
    TimeUp { score: u32 },
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Per-frame event queue with ordered listeners
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(Subscription, Listener)>,
    queue: Vec<GameEvent>,
    next_id: u64,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("queue", &self.queue)
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; listeners run in registration order
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> Subscription {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; unknown handles are ignored
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.listeners.retain(|(id, _)| *id != subscription);
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    /// Events queued since the last dispatch
    pub fn pending(&self) -> &[GameEvent] {
        &self.queue
    }

    /// Drop queued events without delivering them
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Deliver queued events to every listener and return them
    pub fn dispatch(&mut self) -> Vec<GameEvent> {
        let events = std::mem::take(&mut self.queue);
        for event in &events {
            for (_, listener) in self.listeners.iter_mut() {
                listener(event);
            }
        }
        events
    }
}
