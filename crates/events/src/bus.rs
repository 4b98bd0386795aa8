//! Synchronous in-process pub/sub bus.
//!
//! Delivery is plain function dispatch on the calling thread: `emit` invokes
//! every matching subscriber before it returns, and a subscriber may itself
//! call `emit` (strict synchronous nesting). There is no queuing, no retry
//! and no persistence; a missed event is simply missed.
//!
//! The bus is single-threaded by design (the whole core runs cooperatively
//! on one thread), so it is built on `Rc`/`RefCell` and is intentionally not
//! `Send`/`Sync`. Construct one explicitly and hand it to every component
//! (never a hidden global) so tests can run isolated buses side by side.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::journal::EventJournal;
use crate::pattern::EventPattern;

/// Event payload: untyped JSON carried alongside the event name.
pub type Payload = serde_json::Value;

/// A subscriber callback.
///
/// Receives the concrete event name (pattern subscribers need it to tell
/// matches apart) and the payload. A returned `Err` is logged and isolated;
/// it never stops delivery to other subscribers.
pub type Handler = Rc<dyn Fn(&str, &Payload) -> anyhow::Result<()>>;

/// Subscription key: an exact event name or a pattern over names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectKey {
    Exact(String),
    Pattern(EventPattern),
}

impl SubjectKey {
    pub fn exact(name: impl Into<String>) -> Self {
        Self::Exact(name.into())
    }

    pub fn pattern(source: impl Into<String>) -> Self {
        Self::Pattern(EventPattern::new(source))
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(exact) => exact == name,
            Self::Pattern(pattern) => pattern.matches(name),
        }
    }
}

impl From<&str> for SubjectKey {
    fn from(name: &str) -> Self {
        Self::Exact(name.to_string())
    }
}

impl From<EventPattern> for SubjectKey {
    fn from(pattern: EventPattern) -> Self {
        Self::Pattern(pattern)
    }
}

struct Entry {
    key: SubjectKey,
    handlers: Vec<Handler>,
}

/// In-process pub/sub bus with exact and pattern subscriptions.
///
/// Per key, handlers form a set (registering the identical handler twice is
/// a no-op) and are invoked in registration order. Between keys there is no
/// ordering guarantee.
#[derive(Default)]
pub struct EventBus {
    entries: RefCell<Vec<Entry>>,
    journal: Option<EventJournal>,
}

// Handlers are fat `dyn` pointers; compare the data half only, so the
// comparison is not sensitive to vtable duplication across codegen units.
fn same_handler(a: &Handler, b: &Handler) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const u8, Rc::as_ptr(b) as *const u8)
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bus that records its last `capacity` emissions for diagnostics.
    pub fn with_journal(capacity: usize) -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            journal: Some(EventJournal::new(capacity)),
        }
    }

    pub fn journal(&self) -> Option<&EventJournal> {
        self.journal.as_ref()
    }

    /// Register `handler` under `key`.
    ///
    /// Idempotent per exact (key, handler) pair: a handler already present
    /// under the same key is not added again.
    pub fn subscribe(&self, key: impl Into<SubjectKey>, handler: Handler) {
        let key = key.into();
        let mut entries = self.entries.borrow_mut();
        match entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => {
                if !entry.handlers.iter().any(|h| same_handler(h, &handler)) {
                    entry.handlers.push(handler);
                }
            }
            None => entries.push(Entry {
                key,
                handlers: vec![handler],
            }),
        }
    }

    /// Convenience: wrap a closure, subscribe it and hand back the handle
    /// (needed later for `unsubscribe`).
    pub fn on(
        &self,
        key: impl Into<SubjectKey>,
        f: impl Fn(&str, &Payload) -> anyhow::Result<()> + 'static,
    ) -> Handler {
        let handler: Handler = Rc::new(f);
        self.subscribe(key, Rc::clone(&handler));
        handler
    }

    /// Remove `handler` from `key`.
    ///
    /// Removing a handler that was never registered is a silent no-op.
    /// Removing the last handler for a key prunes the key.
    pub fn unsubscribe(&self, key: impl Into<SubjectKey>, handler: &Handler) {
        let key = key.into();
        let mut entries = self.entries.borrow_mut();
        if let Some(at) = entries.iter().position(|e| e.key == key) {
            entries[at].handlers.retain(|h| !same_handler(h, handler));
            if entries[at].handlers.is_empty() {
                entries.remove(at);
            }
        }
    }

    /// Deliver `payload` to every handler of every key matching `name`.
    ///
    /// The handler list is snapshotted up front and no bus borrow is held
    /// while handlers run, so a handler may freely subscribe, unsubscribe
    /// or emit. A handler unsubscribed mid-emission is skipped when its
    /// turn comes; a handler subscribed mid-emission waits for the next
    /// emission. Handler failures are logged and do not stop delivery.
    pub fn emit(&self, name: &str, payload: &Payload) {
        if let Some(journal) = &self.journal {
            journal.record(name, payload);
        }
        tracing::trace!(event = name, "emit");

        let matched: Vec<(SubjectKey, Handler)> = {
            let entries = self.entries.borrow();
            entries
                .iter()
                .filter(|e| e.key.matches(name))
                .flat_map(|e| e.handlers.iter().map(|h| (e.key.clone(), Rc::clone(h))))
                .collect()
        };

        for (key, handler) in matched {
            if !self.is_registered_under(&key, &handler) {
                continue;
            }
            if let Err(err) = handler(name, payload) {
                tracing::warn!(event = name, error = %err, "subscriber failed, continuing delivery");
            }
        }
    }

    /// Emit a payload-less event.
    pub fn emit_unit(&self, name: &str) {
        self.emit(name, &Payload::Null);
    }

    /// Serialize `value` and emit it; a serialization failure is logged and
    /// the event is dropped (nothing to deliver).
    pub fn emit_serialized<T: Serialize>(&self, name: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(payload) => self.emit(name, &payload),
            Err(err) => {
                tracing::error!(event = name, error = %err, "payload serialization failed");
            }
        }
    }

    // The re-check is per key: unsubscribing a handler from the matched key
    // must silence it for this emission even while it stays subscribed under
    // other keys.
    fn is_registered_under(&self, key: &SubjectKey, handler: &Handler) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|e| &e.key == key && e.handlers.iter().any(|h| same_handler(h, handler)))
    }
}

impl core::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let entries = self.entries.borrow();
        f.debug_struct("EventBus")
            .field("keys", &entries.len())
            .field(
                "handlers",
                &entries.iter().map(|e| e.handlers.len()).sum::<usize>(),
            )
            .finish()
    }
}
