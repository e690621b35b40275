use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ContactField, ValidationError};

/// A persisted contact record
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

// Request DTOs

/// Unvalidated field set submitted by a client.
///
/// Every field is optional on the wire so that a missing field is reported by
/// [`ContactDraft::validate`] rather than by the JSON deserializer.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactDraft {
    pub fn new(name: &str, email: &str, phone: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
            message: None,
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    /// Checks the required fields in the order name, email, phone and reports
    /// the first one that is absent or empty. Whitespace counts as content.
    pub fn validate(self) -> Result<NewContact, ValidationError> {
        let name = required(self.name, ContactField::Name)?;
        let email = required(self.email, ContactField::Email)?;
        let phone = required(self.phone, ContactField::Phone)?;
        let message = self.message.filter(|m| !m.is_empty());

        Ok(NewContact {
            name,
            email,
            phone,
            message,
        })
    }
}

fn required(value: Option<String>, field: ContactField) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// A draft that passed validation and is ready to be stamped by a store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
}

impl NewContact {
    pub fn into_contact(self, id: String, at: DateTime<Utc>) -> Contact {
        Contact {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            created_at: at,
            updated_at: at,
        }
    }
}

// Response DTOs for general use across services
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// Helper function to get the current timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
