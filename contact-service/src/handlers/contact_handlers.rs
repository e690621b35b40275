use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use contact_shared::models::{Contact, ContactDraft, MessageResponse};
use contact_shared::store::ContactStore;
use log::info;
use std::sync::Arc;

use crate::error::Result;

pub const CONTACT_DELETED: &str = "Contact deleted";

// POST /api/contacts
pub async fn create_contact<S>(
    State(store): State<Arc<S>>,
    payload: std::result::Result<Json<ContactDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>)>
where
    S: ContactStore + ?Sized,
{
    let Json(draft) = payload?;

    let contact = store.create(draft).await?;
    info!("Created contact {}", contact.id);

    Ok((StatusCode::CREATED, Json(contact)))
}

// GET /api/contacts
pub async fn list_contacts<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Contact>>>
where
    S: ContactStore + ?Sized,
{
    let contacts = store.list_all().await?;
    info!("Listing {} contacts", contacts.len());

    Ok(Json(contacts))
}

// DELETE /api/contacts/:id
pub async fn delete_contact<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>>
where
    S: ContactStore + ?Sized,
{
    let deleted = store.delete_by_id(&id).await?;
    info!("Deleted contact {}", deleted.id);

    Ok(Json(MessageResponse::new(CONTACT_DELETED)))
}
