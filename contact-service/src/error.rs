use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contact_shared::{
    error::{ServiceError, ValidationError},
    models::MessageResponse,
};
use log::{error, warn};
use thiserror::Error;

pub const CONTACT_NOT_FOUND: &str = "Contact not found";

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Service(ValidationError::MalformedBody(rejection.body_text()).into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Service(err) = self;
        let (status, message) = match err {
            ServiceError::Validation(err) => {
                warn!("Bad request: {}", err);
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ServiceError::NotFound(id) => {
                warn!("Contact not found: {}", id);
                (StatusCode::NOT_FOUND, CONTACT_NOT_FOUND.to_string())
            }
            ServiceError::StoreFault(msg) => {
                error!("Store fault: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
