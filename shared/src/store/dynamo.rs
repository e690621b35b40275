use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use log::{debug, info};
use serde_dynamo::{from_item, to_item};
use std::env;
use uuid::Uuid;

use super::{sort_newest_first, ContactStore, MonotonicClock};
use crate::error::{
    map_delete_dynamo_error, map_put_dynamo_error, map_scan_dynamo_error, Result, ServiceError,
};
use crate::models::{Contact, ContactDraft};

// Contact Store Constants
const CONTACT_TABLE_NAME: &str = "contact-table";

/// DynamoDB store for contacts, one item per contact keyed by `id`.
///
/// `createdAt` comes from a per-process monotonic clock that is also advanced
/// past every timestamp seen while listing. Writers in other processes can
/// still tie; those ties list in scan order.
pub struct DynamoContactStore {
    client: Client,
    table_name: String,
    clock: MonotonicClock,
}

impl DynamoContactStore {
    /// Creates a new DynamoDB store from the ambient AWS configuration.
    ///
    /// `DYNAMODB_TABLE` overrides the table name and `DYNAMODB_ENDPOINT` points
    /// the client at a local DynamoDB instance.
    pub async fn new() -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Ok(endpoint) = env::var("DYNAMODB_ENDPOINT") {
            info!("Using DynamoDB endpoint override: {}", endpoint);
            loader = loader.endpoint_url(endpoint);
        }
        let config = loader.load().await;

        let client = Client::new(&config);

        let table_name =
            env::var("DYNAMODB_TABLE").unwrap_or_else(|_| CONTACT_TABLE_NAME.to_string());

        Self::with_client_and_table(client, table_name)
    }

    /// Creates a new DynamoDB store with the specified client and table name.
    /// This is mainly useful for testing with a local DynamoDB instance.
    pub fn with_client_and_table(client: Client, table_name: String) -> Self {
        Self {
            client,
            table_name,
            clock: MonotonicClock::default(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl ContactStore for DynamoContactStore {
    async fn create(&self, draft: ContactDraft) -> Result<Contact> {
        let new_contact = draft.validate()?;
        let contact = new_contact.into_contact(Uuid::new_v4().to_string(), self.clock.stamp());

        let item = to_item(&contact)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(|e| map_put_dynamo_error(e, &contact.id))?;

        debug!("Stored contact {} in {}", contact.id, self.table_name);
        Ok(contact)
    }

    async fn list_all(&self) -> Result<Vec<Contact>> {
        let mut contacts = Vec::new();
        let mut last_key = None;

        loop {
            let response = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(last_key)
                .send()
                .await
                .map_err(map_scan_dynamo_error)?;

            for item in response.items() {
                let contact: Contact = from_item(item.clone())?;
                contacts.push(contact);
            }

            last_key = response.last_evaluated_key().cloned();
            if last_key.is_none() {
                break;
            }
        }

        sort_newest_first(&mut contacts);
        if let Some(newest) = contacts.first() {
            self.clock.observe(newest.created_at);
        }
        Ok(contacts)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Contact> {
        // The condition makes concurrent deletes of one id resolve to a single winner
        let response = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .condition_expression("attribute_exists(id)")
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| map_delete_dynamo_error(e, id))?;

        let attributes = response
            .attributes()
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        let contact = from_item(attributes)?;
        Ok(contact)
    }
}
