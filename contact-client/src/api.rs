use async_trait::async_trait;
use contact_shared::models::{Contact, ContactDraft, MessageResponse};
use log::debug;
use reqwest::{Response, StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded {status}: {message}")]
    Status { status: StatusCode, message: String },
}

/// The three calls the client makes against the contact service
#[async_trait]
pub trait ContactApi: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Contact>, ApiError>;

    async fn create(&self, draft: &ContactDraft) -> Result<Contact, ApiError>;

    async fn delete(&self, id: &str) -> Result<MessageResponse, ApiError>;
}

/// reqwest-backed client for the JSON contact API
#[derive(Clone)]
pub struct HttpContactApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContactApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

// Turns a non-2xx response into ApiError::Status, preferring the server's `{message}`
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageResponse>(&body)
        .map(|r| r.message)
        .unwrap_or(body);

    Err(ApiError::Status { status, message })
}

#[async_trait]
impl ContactApi for HttpContactApi {
    async fn list(&self) -> Result<Vec<Contact>, ApiError> {
        debug!("GET {}", self.base_url);
        let response = self.client.get(&self.base_url).send().await?;
        let contacts = check_status(response).await?.json().await?;
        Ok(contacts)
    }

    async fn create(&self, draft: &ContactDraft) -> Result<Contact, ApiError> {
        debug!("POST {}", self.base_url);
        let response = self.client.post(&self.base_url).json(draft).send().await?;
        let contact = check_status(response).await?.json().await?;
        Ok(contact)
    }

    async fn delete(&self, id: &str) -> Result<MessageResponse, ApiError> {
        let url = format!("{}/delete/{}", self.base_url, id);
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        let confirmation = check_status(response).await?.json().await?;
        Ok(confirmation)
    }
}
