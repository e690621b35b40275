use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use contact_shared::models::{Contact, ContactDraft, MessageResponse};
use contact_shared::store::memory::MemoryContactStore;
use contact_shared::store::ContactStore;
use contact_shared::test_utils::test_logging::init_test_logging;
use reqwest::StatusCode;
use tokio::sync::Notify;

use crate::api::{ApiError, ContactApi};
use crate::render::ContactTable;
use crate::state::{
    Confirm, ContactClient, ContactForm, DeleteOutcome, FormField, Notice, Notifier,
    SubmitOutcome,
};

/// ContactApi backed by the in-memory store, with switchable failures
#[derive(Default)]
struct FakeApi {
    store: MemoryContactStore,
    fail_list: Mutex<bool>,
    fail_create: Mutex<bool>,
    calls: Mutex<Vec<&'static str>>,
    create_gate: Option<Arc<Notify>>,
}

fn unavailable() -> ApiError {
    ApiError::Status {
        status: StatusCode::SERVICE_UNAVAILABLE,
        message: "service asleep".into(),
    }
}

impl FakeApi {
    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ContactApi for FakeApi {
    async fn list(&self) -> Result<Vec<Contact>, ApiError> {
        self.record("list");
        if *self.fail_list.lock().unwrap() {
            return Err(unavailable());
        }
        Ok(self.store.list_all().await.unwrap())
    }

    async fn create(&self, draft: &ContactDraft) -> Result<Contact, ApiError> {
        self.record("create");
        if let Some(gate) = &self.create_gate {
            gate.notified().await;
        }
        if *self.fail_create.lock().unwrap() {
            return Err(unavailable());
        }
        self.store
            .create(draft.clone())
            .await
            .map_err(|e| ApiError::Status {
                status: StatusCode::BAD_REQUEST,
                message: e.to_string(),
            })
    }

    async fn delete(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.record("delete");
        self.store
            .delete_by_id(id)
            .await
            .map(|_| MessageResponse::new("Contact deleted"))
            .map_err(|_| ApiError::Status {
                status: StatusCode::NOT_FOUND,
                message: "Contact not found".into(),
            })
    }
}

#[derive(Default)]
struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

struct Answer(bool);

impl Confirm for Answer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

fn client_with(api: FakeApi) -> (ContactClient<FakeApi>, Arc<RecordingNotifier>) {
    init_test_logging();
    let notifier = Arc::new(RecordingNotifier::default());
    (ContactClient::new(api, notifier.clone()), notifier)
}

fn fill_form(client: &ContactClient<FakeApi>, name: &str, email: &str, phone: &str) {
    client.set_field(FormField::Name, name);
    client.set_field(FormField::Email, email);
    client.set_field(FormField::Phone, phone);
}

fn contact(name: &str) -> Contact {
    ContactDraft::new(name, "seed@x.com", "555-0000")
        .validate()
        .unwrap()
        .into_contact(format!("seed-{}", name), contact_shared::models::now())
}

#[tokio::test]
async fn test_activate_loads_contacts() {
    let api = FakeApi {
        store: MemoryContactStore::with_data(vec![contact("Alice")]),
        ..Default::default()
    };
    let (client, _) = client_with(api);

    assert!(client.snapshot().contacts.is_empty());
    client.activate().await;

    let state = client.snapshot();
    assert_eq!(state.contacts.len(), 1);
    assert_eq!(state.contacts[0].name, "Alice");
    assert_eq!(state.form_data, ContactForm::default());
    assert!(!state.loading);
}

#[tokio::test]
async fn test_failed_fetch_is_silent_and_keeps_previous_list() {
    let api = FakeApi {
        store: MemoryContactStore::with_data(vec![contact("Alice")]),
        ..Default::default()
    };
    let (client, notifier) = client_with(api);
    client.activate().await;

    *client.api().fail_list.lock().unwrap() = true;
    client.refresh().await;

    assert_eq!(client.snapshot().contacts.len(), 1);
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn test_submit_gate() {
    let (client, _) = client_with(FakeApi::default());
    assert!(!client.can_submit());

    fill_form(&client, "Alice", "a-at-x.com", "555-1111");
    assert!(!client.can_submit());

    client.set_field(FormField::Email, "a@x.com");
    assert!(client.can_submit());

    client.set_field(FormField::Phone, "");
    assert!(!client.can_submit());
    assert!(matches!(client.submit().await, SubmitOutcome::Blocked));
    assert!(client.api().calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_success_clears_form_and_refetches() {
    let (client, notifier) = client_with(FakeApi::default());
    client.activate().await;

    fill_form(&client, "Alice", "a@x.com", "555-1111");
    client.set_field(FormField::Message, "hello");

    let saved = match client.submit().await {
        SubmitOutcome::Saved(contact) => contact,
        other => panic!("Expected save, got {:?}", other),
    };
    assert_eq!(saved.message.as_deref(), Some("hello"));

    let state = client.snapshot();
    assert_eq!(state.form_data, ContactForm::default());
    assert!(!state.loading);
    assert_eq!(state.contacts.len(), 1);
    assert_eq!(state.contacts[0].id, saved.id);
    assert_eq!(notifier.notices(), vec![Notice::ContactAdded]);
    assert_eq!(
        *client.api().calls.lock().unwrap(),
        vec!["list", "create", "list"]
    );
}

#[tokio::test]
async fn test_submit_failure_notifies_without_refetch() {
    let api = FakeApi {
        fail_create: Mutex::new(true),
        ..Default::default()
    };
    let (client, notifier) = client_with(api);

    fill_form(&client, "Alice", "a@x.com", "555-1111");
    assert!(matches!(client.submit().await, SubmitOutcome::Failed(_)));

    let state = client.snapshot();
    assert!(!state.loading);
    assert_eq!(state.form_data.name, "Alice");
    assert_eq!(notifier.notices(), vec![Notice::SaveFailed]);
    assert_eq!(*client.api().calls.lock().unwrap(), vec!["create"]);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let api = FakeApi {
        store: MemoryContactStore::with_data(vec![contact("Alice")]),
        ..Default::default()
    };
    let (client, _) = client_with(api);
    client.activate().await;

    let outcome = client.delete("seed-Alice", &Answer(false)).await;
    assert!(matches!(outcome, DeleteOutcome::Cancelled));
    assert_eq!(client.snapshot().contacts.len(), 1);
    assert_eq!(*client.api().calls.lock().unwrap(), vec!["list"]);
}

#[tokio::test]
async fn test_delete_failure_leaves_contacts_unchanged() {
    let api = FakeApi {
        store: MemoryContactStore::with_data(vec![contact("Alice")]),
        ..Default::default()
    };
    let (client, notifier) = client_with(api);
    client.activate().await;
    let before = client.snapshot().contacts;

    let outcome = client.delete("missing", &Answer(true)).await;
    assert!(matches!(outcome, DeleteOutcome::Failed(_)));
    assert_eq!(client.snapshot().contacts, before);
    assert_eq!(notifier.notices(), vec![Notice::DeleteFailed]);
}

#[tokio::test]
async fn test_end_to_end_add_then_delete_renders_placeholder() {
    let (client, _) = client_with(FakeApi::default());
    client.activate().await;
    assert_eq!(client.render(), ContactTable::Empty);

    fill_form(&client, "Alice", "a@x.com", "555-1111");
    client.submit().await;

    let rows = client.render().rows().to_vec();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Alice");

    let outcome = client.delete(&rows[0].id, &Answer(true)).await;
    assert!(matches!(outcome, DeleteOutcome::Deleted));
    assert!(client.snapshot().contacts.is_empty());
    assert_eq!(client.render().to_string(), "No contacts found.\n");
}

#[tokio::test]
async fn test_delete_may_overlap_inflight_create() {
    let gate = Arc::new(Notify::new());
    let api = FakeApi {
        store: MemoryContactStore::with_data(vec![contact("Alice")]),
        create_gate: Some(gate.clone()),
        ..Default::default()
    };
    let (client, _) = client_with(api);
    client.activate().await;

    fill_form(&client, "Bob", "b@x.com", "555-2222");
    let submitting = tokio::spawn({
        let client = client.clone();
        async move { client.submit().await }
    });

    // Wait until the create is in flight
    while !client.api().calls.lock().unwrap().contains(&"create") {
        tokio::task::yield_now().await;
    }
    assert!(client.snapshot().loading);
    assert!(!client.can_submit());

    let outcome = client.delete("seed-Alice", &Answer(true)).await;
    assert!(matches!(outcome, DeleteOutcome::Deleted));
    assert!(client.snapshot().contacts.is_empty());

    gate.notify_one();
    assert!(matches!(submitting.await.unwrap(), SubmitOutcome::Saved(_)));

    let state = client.snapshot();
    assert!(!state.loading);
    assert_eq!(state.contacts.len(), 1);
    assert_eq!(state.contacts[0].name, "Bob");
}
