//! `kiosk-events` — the in-process pub/sub primitive.
//!
//! No domain knowledge lives here: the bus moves named events with JSON
//! payloads between components that never reference each other directly.

pub mod bus;
pub mod journal;
pub mod names;
pub mod pattern;

pub use bus::{EventBus, Handler, Payload, SubjectKey};
pub use journal::{EventJournal, EventRecord};
pub use pattern::EventPattern;
