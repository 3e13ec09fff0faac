//=========================================================================
// Lifecycle Events
//=========================================================================
//
// Per-window publish/subscribe channel for lifecycle notifications.
//
// Every window owns its own emitter; there is no process-wide registry
// of listeners. Listeners run synchronously on the logic thread in
// subscription order. A listener that wants to navigate should hold a
// `Navigator`; its requests are queued and applied once the current
// operation settles.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== LifecycleEvent ======================================================

/// Notifications a window emits around its transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// A show was requested; contents are about to refresh.
    WillShow,

    /// The window is fully shown.
    Shown,

    /// A hide was requested.
    WillHide,

    /// The window is hidden and its surface deactivated.
    Hidden,
}

//=== SubscriptionId ======================================================

/// Handle returned by [`LifecycleEmitter::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

//=== LifecycleEmitter ====================================================

struct Listener {
    id: SubscriptionId,
    filter: Option<LifecycleEvent>,
    callback: Box<dyn FnMut(LifecycleEvent)>,
}

/// Listener list owned by a single window.
#[derive(Default)]
pub struct LifecycleEmitter {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl LifecycleEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to every lifecycle event.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(LifecycleEvent) + 'static,
    {
        self.add(None, Box::new(callback))
    }

    /// Subscribes to a single lifecycle event.
    pub fn subscribe_to<F>(&mut self, event: LifecycleEvent, mut callback: F) -> SubscriptionId
    where
        F: FnMut() + 'static,
    {
        self.add(Some(event), Box::new(move |_| callback()))
    }

    /// Removes a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn emit(&mut self, event: LifecycleEvent) {
        for listener in &mut self.listeners {
            if listener.filter.map_or(true, |filter| filter == event) {
                (listener.callback)(event);
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.listeners.clear();
    }

    fn add(&mut self, filter: Option<LifecycleEvent>, callback: Box<dyn FnMut(LifecycleEvent)>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener { id, filter, callback });
        id
    }
}

impl fmt::Debug for LifecycleEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleEmitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn subscriber_receives_all_events_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = LifecycleEmitter::new();

        let sink = seen.clone();
        emitter.subscribe(move |event| sink.borrow_mut().push(event));

        emitter.emit(LifecycleEvent::WillShow);
        emitter.emit(LifecycleEvent::Shown);

        assert_eq!(*seen.borrow(), vec![LifecycleEvent::WillShow, LifecycleEvent::Shown]);
    }

    #[test]
    fn filtered_subscriber_ignores_other_events() {
        let count = Rc::new(RefCell::new(0));
        let mut emitter = LifecycleEmitter::new();

        let sink = count.clone();
        emitter.subscribe_to(LifecycleEvent::Hidden, move || *sink.borrow_mut() += 1);

        emitter.emit(LifecycleEvent::WillHide);
        emitter.emit(LifecycleEvent::Hidden);
        emitter.emit(LifecycleEvent::Shown);

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut emitter = LifecycleEmitter::new();

        let sink = count.clone();
        let id = emitter.subscribe(move |_| *sink.borrow_mut() += 1);

        assert!(emitter.unsubscribe(id));
        assert!(!emitter.unsubscribe(id));
        emitter.emit(LifecycleEvent::Shown);

        assert_eq!(*count.borrow(), 0);
        assert!(emitter.is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let mut emitter = LifecycleEmitter::new();
        let a = emitter.subscribe(|_| {});
        let b = emitter.subscribe(|_| {});
        assert_ne!(a, b);
        assert_eq!(emitter.len(), 2);
    }
}
