pub mod api;
pub mod config;
pub mod render;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{ApiError, ContactApi, HttpContactApi};
pub use config::ClientConfig;
pub use render::{ContactRow, ContactTable};
pub use state::{
    ClientState, Confirm, ContactClient, ContactForm, DeleteOutcome, FormField, Notice, Notifier,
    SubmitOutcome,
};
