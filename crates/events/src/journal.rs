//! Bounded in-memory record of emitted events.
//!
//! The journal is a diagnostic aid, not a store: it never affects delivery
//! and old records are dropped once capacity is reached.

use std::cell::RefCell;
use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::bus::Payload;

/// One recorded emission.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub occurred_at: DateTime<Utc>,
    pub name: String,
    pub payload: Payload,
}

/// Ring of the most recent emissions on a bus.
#[derive(Debug)]
pub struct EventJournal {
    capacity: usize,
    records: RefCell<VecDeque<EventRecord>>,
}

impl EventJournal {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            records: RefCell::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn record(&self, name: &str, payload: &Payload) {
        if self.capacity == 0 {
            return;
        }
        let mut records = self.records.borrow_mut();
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(EventRecord {
            occurred_at: Utc::now(),
            name: name.to_string(),
            payload: payload.clone(),
        });
    }

    /// Recorded emissions, oldest first.
    pub fn recent(&self) -> Vec<EventRecord> {
        self.records.borrow().iter().cloned().collect()
    }

    /// Recorded event names, oldest first.
    pub fn names(&self) -> Vec<String> {
        self.records.borrow().iter().map(|r| r.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}
