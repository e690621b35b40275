use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::error::Result;
use crate::models::{now, Contact, ContactDraft};

// Expose the DynamoDB store module
pub mod dynamo;
pub mod memory;

/// ContactStore trait defining the interface for contact storage implementations
#[async_trait]
pub trait ContactStore: Send + Sync + 'static {
    /// Validates a draft, assigns id and timestamps, and persists it
    async fn create(&self, draft: ContactDraft) -> Result<Contact>;

    /// Gets every contact, newest first
    async fn list_all(&self) -> Result<Vec<Contact>>;

    /// Removes and returns the contact with the given id
    async fn delete_by_id(&self, id: &str) -> Result<Contact>;
}

/// Orders contacts newest first. The sort is stable, so callers control how
/// records with identical timestamps are ordered.
pub fn sort_newest_first(contacts: &mut [Contact]) {
    contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Hands out creation timestamps that never go backwards and never repeat
/// within this process, even if the wall clock steps back.
#[derive(Default)]
pub struct MonotonicClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl MonotonicClock {
    pub fn stamp(&self) -> DateTime<Utc> {
        self.stamp_at(now())
    }

    pub fn stamp_at(&self, current: DateTime<Utc>) -> DateTime<Utc> {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let stamped = match *last {
            Some(prev) if current <= prev => prev + Duration::nanoseconds(1),
            _ => current,
        };
        *last = Some(stamped);
        stamped
    }

    /// Records a timestamp read back from storage so later stamps sort after it
    pub fn observe(&self, seen: DateTime<Utc>) {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if last.map_or(true, |prev| seen > prev) {
            *last = Some(seen);
        }
    }
}
