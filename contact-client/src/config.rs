use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/contacts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the contacts collection, without a trailing slash
    pub api_url: String,
}

impl ClientConfig {
    /// Reads `CONTACT_API_URL`, falling back to a locally running service
    pub fn from_env() -> Self {
        let api_url = env::var("CONTACT_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
        }
    }
}
