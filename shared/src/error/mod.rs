use std::fmt;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// The required fields of a contact draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Phone,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Contact validation failed: {0} is required")]
    MissingField(ContactField),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Contact not found: {0}")]
    NotFound(String),

    #[error("Store fault: {0}")]
    StoreFault(String),
}

// Helper function to map general DynamoDB errors
pub fn map_dynamo_error<E>(operation: &str, err: SdkError<E>) -> ServiceError {
    ServiceError::StoreFault(format!("DynamoDB {} error: {}", operation, err))
}

// A failed `attribute_not_exists(id)` condition means the generated id collided
pub fn map_put_dynamo_error(err: SdkError<PutItemError>, id: &str) -> ServiceError {
    match &err {
        SdkError::ServiceError(service_err)
            if service_err.err().is_conditional_check_failed_exception() =>
        {
            ServiceError::StoreFault(format!("Contact id already in use: {}", id))
        }
        _ => map_dynamo_error("put_item", err),
    }
}

// A failed `attribute_exists(id)` condition means there was nothing to delete
pub fn map_delete_dynamo_error(err: SdkError<DeleteItemError>, id: &str) -> ServiceError {
    match &err {
        SdkError::ServiceError(service_err)
            if service_err.err().is_conditional_check_failed_exception() =>
        {
            ServiceError::NotFound(id.to_string())
        }
        _ => map_dynamo_error("delete_item", err),
    }
}

pub fn map_scan_dynamo_error(err: SdkError<ScanError>) -> ServiceError {
    map_dynamo_error("scan", err)
}

impl From<serde_dynamo::Error> for ServiceError {
    fn from(err: serde_dynamo::Error) -> Self {
        ServiceError::StoreFault(format!("DynamoDB serialization error: {}", err))
    }
}
