use async_trait::async_trait;

use crate::error::{Result, ServiceError};
use crate::models::{Contact, ContactDraft};
use crate::store::ContactStore;

/// A ContactStore whose backend is always unreachable
pub struct FailingContactStore;

fn unreachable_backend() -> ServiceError {
    ServiceError::StoreFault("connection refused".into())
}

#[async_trait]
impl ContactStore for FailingContactStore {
    async fn create(&self, draft: ContactDraft) -> Result<Contact> {
        // Validation still runs first, like the real stores
        draft.validate()?;
        Err(unreachable_backend())
    }

    async fn list_all(&self) -> Result<Vec<Contact>> {
        Err(unreachable_backend())
    }

    async fn delete_by_id(&self, _id: &str) -> Result<Contact> {
        Err(unreachable_backend())
    }
}
