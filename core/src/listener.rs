//! Observer list for step events.
//!
//! Listeners run synchronously on the thread that called `on_sample` or
//! `reset`, in subscription order. A listener that blocks stalls sample
//! processing; slow consumers should subscribe a [`ChannelListener`] and do
//! their work on the receiving side.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Event delivered to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StepEvent {
    StepDetected { total_steps: u64 },
    CountReset,
}

pub trait StepListener: Send {
    fn on_step_detected(&mut self, total_steps: u64);

    fn on_step_count_reset(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<(ListenerId, Box<dyn StepListener>)>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn StepListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify_step(&mut self, total_steps: u64) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_step_detected(total_steps);
        }
    }

    pub fn notify_reset(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_step_count_reset();
        }
    }
}

/// Forwards events into an unbounded channel without blocking the caller.
pub struct ChannelListener {
    sender: UnboundedSender<StepEvent>,
}

impl ChannelListener {
    pub fn new(sender: UnboundedSender<StepEvent>) -> Self {
        Self { sender }
    }

    pub fn channel() -> (Self, UnboundedReceiver<StepEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl StepListener for ChannelListener {
    fn on_step_detected(&mut self, total_steps: u64) {
        // A dropped receiver just means nobody is listening any more.
        let _ = self.sender.send(StepEvent::StepDetected { total_steps });
    }

    fn on_step_count_reset(&mut self) {
        let _ = self.sender.send(StepEvent::CountReset);
    }
}

/// Collects every event in memory. Clones share the same log.
#[derive(Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<StepEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<StepEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn step_totals(&self) -> Vec<u64> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                StepEvent::StepDetected { total_steps } => Some(total_steps),
                StepEvent::CountReset => None,
            })
            .collect()
    }

    pub fn reset_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, StepEvent::CountReset))
            .count()
    }

    fn push(&self, event: StepEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl StepListener for EventRecorder {
    fn on_step_detected(&mut self, total_steps: u64) {
        self.push(StepEvent::StepDetected { total_steps });
    }

    fn on_step_count_reset(&mut self) {
        self.push(StepEvent::CountReset);
    }
}
