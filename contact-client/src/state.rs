use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use contact_shared::models::{Contact, ContactDraft};
use log::{error, info, warn};

use crate::api::{ApiError, ContactApi};
use crate::render::ContactTable;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this contact?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Message,
}

/// Draft fields as typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    /// Client-side gate only; the service validates independently
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && self.email.contains('@') && !self.phone.is_empty()
    }

    fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            message: Some(self.message.clone()).filter(|m| !m.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    pub contacts: Vec<Contact>,
    pub form_data: ContactForm,
    /// True only while a create request is in flight
    pub loading: bool,
}

/// User-visible notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ContactAdded,
    SaveFailed,
    DeleteFailed,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Notice::ContactAdded => "Contact added successfully!",
            Notice::SaveFailed => "Error saving contact. Please check that the service is reachable.",
            Notice::DeleteFailed => "Delete failed",
        };
        f.write_str(text)
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Asks the user to confirm a destructive action
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// The form gate was closed; nothing was sent
    Blocked,
    Saved(Contact),
    Failed(ApiError),
}

#[derive(Debug)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed(ApiError),
}

/// UI state kept consistent with the service by refetching after every mutation.
///
/// The state lock is never held across a request, so a delete may run while a
/// create is in flight; whichever refetch completes last is what remains.
pub struct ContactClient<A> {
    api: Arc<A>,
    state: Arc<Mutex<ClientState>>,
    notifier: Arc<dyn Notifier>,
}

impl<A> Clone for ContactClient<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            state: self.state.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

impl<A: ContactApi> ContactClient<A> {
    pub fn new(api: A, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api: Arc::new(api),
            state: Arc::new(Mutex::new(ClientState::default())),
            notifier,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn state(&self) -> MutexGuard<'_, ClientState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Initial load of the contact list
    pub async fn activate(&self) {
        self.refresh().await;
    }

    /// Replaces `contacts` with the server's list. Failures are logged only and
    /// leave the previous list in place.
    pub async fn refresh(&self) {
        match self.api.list().await {
            Ok(contacts) => {
                info!("Fetched {} contacts", contacts.len());
                self.state().contacts = contacts;
            }
            Err(err) => error!("Error fetching contacts: {}", err),
        }
    }

    pub fn set_field(&self, field: FormField, value: &str) {
        let mut state = self.state();
        let slot = match field {
            FormField::Name => &mut state.form_data.name,
            FormField::Email => &mut state.form_data.email,
            FormField::Phone => &mut state.form_data.phone,
            FormField::Message => &mut state.form_data.message,
        };
        *slot = value.to_string();
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        let state = self.state();
        state.form_data.is_complete() && !state.loading
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let draft = {
            let mut state = self.state();
            if !state.form_data.is_complete() || state.loading {
                return SubmitOutcome::Blocked;
            }
            state.loading = true;
            state.form_data.to_draft()
        };

        let outcome = match self.api.create(&draft).await {
            Ok(contact) => {
                self.state().form_data = ContactForm::default();
                self.refresh().await;
                self.notifier.notify(Notice::ContactAdded);
                SubmitOutcome::Saved(contact)
            }
            Err(err) => {
                warn!("Failed to save contact: {}", err);
                self.notifier.notify(Notice::SaveFailed);
                SubmitOutcome::Failed(err)
            }
        };

        self.state().loading = false;
        outcome
    }

    pub async fn delete(&self, id: &str, confirm: &dyn Confirm) -> DeleteOutcome {
        if !confirm.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete(id).await {
            Ok(_) => {
                self.refresh().await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!("Failed to delete contact {}: {}", id, err);
                self.notifier.notify(Notice::DeleteFailed);
                DeleteOutcome::Failed(err)
            }
        }
    }

    pub fn render(&self) -> ContactTable {
        ContactTable::from_contacts(&self.state().contacts)
    }

    pub fn snapshot(&self) -> ClientState {
        self.state().clone()
    }
}
