//! Owned publish/subscribe bus
//!
//! Each component that announces changes owns one `EventBus` for its own
//! event type; subscribers register through a reference at wiring time.
//! There is no global bus.
//!
//! Handlers receive only the event, never the bus, so a handler cannot
//! subscribe, unsubscribe or emit on the bus that is currently emitting.
//! Re-entrant emission is therefore ruled out at compile time instead of
//! being guarded at runtime. Handlers that need to feed state back into the
//! simulation share it through `Rc<Cell<_>>`/`Rc<RefCell<_>>`, and the owner
//! applies it after `emit` returns.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// An event that can be routed by kind
pub trait BusEvent {
    type Kind: Copy + Eq + Hash + fmt::Debug;

    fn kind(&self) -> Self::Kind;
}

/// Handle returned by `on`/`once`, usable with `off`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Listener<E> {
    id: ListenerId,
    once: bool,
    handler: Box<dyn FnMut(&E)>,
}

/// Synchronous fan-out in registration order
pub struct EventBus<E: BusEvent> {
    listeners: HashMap<E::Kind, Vec<Listener<E>>>,
    next_id: u64,
}

impl<E: BusEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: BusEvent> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<_, _> = self
            .listeners
            .iter()
            .map(|(kind, list)| (*kind, list.len()))
            .collect();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}

impl<E: BusEvent> EventBus<E> {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register a persistent handler for `kind`
    pub fn on(&mut self, kind: E::Kind, handler: impl FnMut(&E) + 'static) -> ListenerId {
        self.register(kind, false, Box::new(handler))
    }

    /// Register a handler that is removed after its first invocation
    pub fn once(&mut self, kind: E::Kind, handler: impl FnMut(&E) + 'static) -> ListenerId {
        self.register(kind, true, Box::new(handler))
    }

    /// Remove a handler. Returns false if it was already gone.
    pub fn off(&mut self, id: ListenerId) -> bool {
        for list in self.listeners.values_mut() {
            if let Some(pos) = list.iter().position(|l| l.id == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Invoke every handler registered for the event's kind, in order.
    /// Emitting with no listeners is a no-op.
    pub fn emit(&mut self, event: &E) {
        let Some(list) = self.listeners.get_mut(&event.kind()) else {
            return;
        };
        for listener in list.iter_mut() {
            (listener.handler)(event);
        }
        list.retain(|l| !l.once);
    }

    /// Number of handlers currently registered for `kind`
    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    fn register(&mut self, kind: E::Kind, once: bool, handler: Box<dyn FnMut(&E)>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.entry(kind).or_default().push(Listener {
            id,
            once,
            handler,
        });
        id
    }
}
