use std::sync::RwLock;

use async_trait::async_trait;
use log::debug;
use uuid::Uuid;

use super::{sort_newest_first, ContactStore};
use crate::error::{Result, ServiceError};
use crate::models::{now, Contact, ContactDraft};

/// In-memory implementation of ContactStore.
///
/// Records are kept in insertion order; a single write lock around each
/// mutation makes create and delete atomic with respect to each other.
#[derive(Default)]
pub struct MemoryContactStore {
    contacts: RwLock<Vec<Contact>>,
}

impl MemoryContactStore {
    /// Creates a new empty in-memory contact store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory contact store with initial data, in insertion order
    pub fn with_data(initial_data: Vec<Contact>) -> Self {
        Self {
            contacts: RwLock::new(initial_data),
        }
    }
}

fn lock_poisoned() -> ServiceError {
    ServiceError::StoreFault("Contact store lock poisoned".into())
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn create(&self, draft: ContactDraft) -> Result<Contact> {
        let new_contact = draft.validate()?;

        let mut contacts = self.contacts.write().map_err(|_| lock_poisoned())?;

        // Keep createdAt monotonic even if the wall clock steps backwards
        let current = now();
        let at = contacts
            .iter()
            .map(|c| c.created_at)
            .max()
            .map_or(current, |latest| latest.max(current));

        let contact = new_contact.into_contact(Uuid::new_v4().to_string(), at);
        contacts.push(contact.clone());
        debug!("Stored contact {} ({} total)", contact.id, contacts.len());

        Ok(contact)
    }

    async fn list_all(&self) -> Result<Vec<Contact>> {
        let contacts = self.contacts.read().map_err(|_| lock_poisoned())?;

        // Later insertions come first among equal timestamps
        let mut listed: Vec<Contact> = contacts.iter().rev().cloned().collect();
        sort_newest_first(&mut listed);

        Ok(listed)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Contact> {
        let mut contacts = self.contacts.write().map_err(|_| lock_poisoned())?;

        let index = contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        Ok(contacts.remove(index))
    }
}
