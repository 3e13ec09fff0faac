//=========================================================================
// Scene Events
//=========================================================================
//
// Channel-backed scene notifications.
//
// Architecture:
//   Host ──SceneEventHub::emit_*()──> Sender (one per subscription)
//                                       ↓
//   WindowService ←── SceneEventCollector::collect_frame() ←── Receiver
//
// Bounded draining prevents a burst of scene events from starving the
// rest of the frame; the remainder is picked up next tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{LoadMode, SceneEvent, SceneKey, SceneNotifier};

//=== SceneSubscription ===================================================

/// Receiving end of a scene notification subscription.
#[derive(Debug)]
pub struct SceneSubscription<S: SceneKey> {
    id: u64,
    receiver: Receiver<SceneEvent<S>>,
}

impl<S: SceneKey> SceneSubscription<S> {
    pub fn new(id: u64, receiver: Receiver<SceneEvent<S>>) -> Self {
        Self { id, receiver }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn into_receiver(self) -> Receiver<SceneEvent<S>> {
        self.receiver
    }
}

//=== SceneEventHub =======================================================

/// Broadcasts scene notifications to every open subscription.
#[derive(Debug)]
pub struct SceneEventHub<S: SceneKey> {
    next_id: u64,
    senders: Vec<(u64, Sender<SceneEvent<S>>)>,
}

impl<S: SceneKey> SceneEventHub<S> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            senders: Vec::new(),
        }
    }

    pub fn emit_loaded(&mut self, scene: S, mode: LoadMode) {
        self.emit(SceneEvent::Loaded { scene, mode });
    }

    pub fn emit_unloaded(&mut self, scene: S) {
        self.emit(SceneEvent::Unloaded(scene));
    }

    /// Sends `event` to all subscribers, pruning those that hung up.
    pub fn emit(&mut self, event: SceneEvent<S>) {
        self.senders.retain(|(id, sender)| match sender.send(event) {
            Ok(()) => true,
            Err(_) => {
                debug!("Dropping disconnected scene subscription {}", id);
                false
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.senders.len()
    }
}

impl<S: SceneKey> Default for SceneEventHub<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SceneKey> SceneNotifier<S> for SceneEventHub<S> {
    fn subscribe(&mut self) -> SceneSubscription<S> {
        let (tx, rx) = unbounded();
        let id = self.next_id;
        self.next_id += 1;
        self.senders.push((id, tx));
        SceneSubscription::new(id, rx)
    }

    fn unsubscribe(&mut self, id: u64) {
        self.senders.retain(|(sender_id, _)| *sender_id != id);
    }
}

//=== CollectStatus =======================================================

/// Whether the notification source is still connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectStatus {
    Open,
    Disconnected,
}

//=== SceneEventCollector =================================================

/// Collects pending scene events with bounded polling.
#[derive(Debug)]
pub struct SceneEventCollector<S: SceneKey> {
    receiver: Receiver<SceneEvent<S>>,
    events: Vec<SceneEvent<S>>,
    max_per_frame: usize,
}

impl<S: SceneKey> SceneEventCollector<S> {
    /// Default upper bound of events drained per frame.
    pub const MAX_EVENTS_PER_FRAME: usize = 100;

    pub fn new(receiver: Receiver<SceneEvent<S>>) -> Self {
        Self::with_capacity(receiver, Self::MAX_EVENTS_PER_FRAME)
    }

    /// # Panics
    ///
    /// Panics if `max_per_frame == 0`.
    pub fn with_capacity(receiver: Receiver<SceneEvent<S>>, max_per_frame: usize) -> Self {
        assert!(max_per_frame > 0, "Event capacity must be positive");
        Self {
            receiver,
            events: Vec::with_capacity(4),
            max_per_frame,
        }
    }

    /// Collects pending events (bounded to prevent starvation).
    pub fn collect_frame(&mut self) -> CollectStatus {
        self.events.clear();
        let mut drained = 0;

        while drained < self.max_per_frame {
            match self.receiver.try_recv() {
                Ok(event) => {
                    self.events.push(event);
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return CollectStatus::Disconnected,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= self.max_per_frame {
            warn!("Scene event backlog: drained {} events this frame", drained);
        }

        CollectStatus::Open
    }

    /// Returns events collected this frame.
    pub fn events(&self) -> &[SceneEvent<S>] {
        &self.events
    }

    /// Takes ownership of collected events, leaving an empty vec.
    pub fn take_events(&mut self) -> Vec<SceneEvent<S>> {
        std::mem::take(&mut self.events)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
