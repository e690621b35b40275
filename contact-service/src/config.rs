use std::env;
use std::net::SocketAddr;

use http::HeaderValue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown STORE_BACKEND '{0}', expected 'dynamo' or 'memory'")]
    UnknownBackend(String),

    #[error("Invalid BIND_ADDR '{0}'")]
    InvalidBindAddr(String),

    #[error("Invalid ALLOWED_ORIGIN '{0}'")]
    InvalidOrigin(String),

    #[error("API_PREFIX must start with '/', got '{0}'")]
    InvalidPrefix(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Dynamo,
    Memory,
}

/// Origins allowed to call the API from a browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigin {
    Any,
    Exact(HeaderValue),
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub store_backend: StoreBackend,
    pub allowed_origin: AllowedOrigin,
    pub bind_addr: SocketAddr,
    pub api_prefix: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            store_backend: StoreBackend::Dynamo,
            allowed_origin: AllowedOrigin::Any,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            api_prefix: String::new(),
        }
    }
}

impl ServiceConfig {
    /// Reads the service configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let store_backend = match env::var("STORE_BACKEND") {
            Err(_) => defaults.store_backend,
            Ok(value) => match value.to_lowercase().as_str() {
                "dynamo" | "dynamodb" => StoreBackend::Dynamo,
                "memory" => StoreBackend::Memory,
                _ => return Err(ConfigError::UnknownBackend(value)),
            },
        };

        let allowed_origin = match env::var("ALLOWED_ORIGIN") {
            Err(_) => AllowedOrigin::Any,
            Ok(value) if value.trim().is_empty() || value.trim() == "*" => AllowedOrigin::Any,
            Ok(value) => HeaderValue::from_str(value.trim())
                .map(AllowedOrigin::Exact)
                .map_err(|_| ConfigError::InvalidOrigin(value))?,
        };

        let bind_addr = match env::var("BIND_ADDR") {
            Err(_) => defaults.bind_addr,
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidBindAddr(value))?,
        };

        let api_prefix = match env::var("API_PREFIX") {
            Err(_) => defaults.api_prefix,
            Ok(value) => {
                let value = value.trim_end_matches('/').to_string();
                if !value.is_empty() && !value.starts_with('/') {
                    return Err(ConfigError::InvalidPrefix(value));
                }
                value
            }
        };

        Ok(Self {
            store_backend,
            allowed_origin,
            bind_addr,
            api_prefix,
        })
    }

    /// Configuration used by router tests: memory store, any origin, no prefix
    pub fn for_tests() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            ..Self::default()
        }
    }
}
