//! Login attempt tracking for the admin login endpoint.
//!
//! Counts consecutive failures per client address; once the limit is hit the
//! address is blocked for a cooldown window. A successful login clears the
//! counter. The store sits behind a trait so the in-process map can be
//! swapped for a shared cache in a multi-instance deployment without
//! touching call sites.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

/// Failure-counter store keyed by client address.
pub trait LoginAttemptStore: Send + Sync {
    /// Whether the address is currently blocked.
    fn is_blocked(&self, key: &str, now: DateTime<Utc>) -> bool;

    /// Records one failed attempt; blocks the address when the limit is hit.
    fn record_failure(&self, key: &str, now: DateTime<Utc>);

    /// Forgets the address (called after a successful login).
    fn clear(&self, key: &str);
}

#[derive(Debug, Clone)]
struct AttemptRecord {
    count: u32,
    blocked_until: Option<DateTime<Utc>>,
}

/// In-process implementation. Per-process state only: each instance tracks
/// its own counters, and they are lost on restart.
pub struct InMemoryLoginAttempts {
    records: RwLock<HashMap<String, AttemptRecord>>,
    max_attempts: u32,
    block_window: Duration,
}

impl InMemoryLoginAttempts {
    pub fn new(max_attempts: u32, block_window: Duration) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            max_attempts,
            block_window,
        }
    }
}

impl LoginAttemptStore for InMemoryLoginAttempts {
    fn is_blocked(&self, key: &str, now: DateTime<Utc>) -> bool {
        let mut records = self.records.write().unwrap();
        match records.get(key) {
            Some(record) => match record.blocked_until {
                // An expired block resets the counter entirely
                Some(until) if until <= now => {
                    records.remove(key);
                    false
                }
                Some(_) => true,
                None => false,
            },
            None => false,
        }
    }

    fn record_failure(&self, key: &str, now: DateTime<Utc>) {
        let mut records = self.records.write().unwrap();
        let record = records.entry(key.to_string()).or_insert(AttemptRecord {
            count: 0,
            blocked_until: None,
        });
        record.count += 1;
        if record.count >= self.max_attempts {
            record.blocked_until = Some(now + self.block_window);
        }
    }

    fn clear(&self, key: &str) {
        self.records.write().unwrap().remove(key);
    }
}

impl std::fmt::Debug for InMemoryLoginAttempts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryLoginAttempts")
            .field("max_attempts", &self.max_attempts)
            .field("tracked_addresses", &self.records.read().unwrap().len())
            .finish()
    }
}
