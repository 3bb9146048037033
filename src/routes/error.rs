use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::Value;
use thiserror::Error;

use crate::core::ExportError;
use crate::models::ErrorResponse;
use crate::services::ResendError;

/// Failures surfaced by the relay and match endpoints
///
/// Each variant maps to one status code; nothing is retried.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid JSON payload: {0}")]
    InvalidPayload(String),

    #[error("Missing RESEND_API_KEY env var")]
    MissingConfiguration,

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("{message}")]
    ProviderRejected {
        message: String,
        details: Option<Value>,
    },

    #[error("Unexpected error: {0}")]
    UnexpectedFailure(String),
}

impl RelayError {
    /// Stable machine-readable tag for the `error` field
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::MethodNotAllowed => "method_not_allowed",
            RelayError::InvalidPayload(_) => "invalid_payload",
            RelayError::MissingConfiguration => "missing_configuration",
            RelayError::MissingRequiredField(_) => "missing_required_field",
            RelayError::ProviderRejected { .. } => "provider_rejected",
            RelayError::UnexpectedFailure(_) => "unexpected_failure",
        }
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            RelayError::MissingConfiguration => StatusCode::SERVICE_UNAVAILABLE,
            RelayError::MissingRequiredField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RelayError::ProviderRejected { .. } => StatusCode::BAD_GATEWAY,
            RelayError::UnexpectedFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let details = match self {
            RelayError::ProviderRejected { details, .. } => details.clone(),
            _ => None,
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status_code: self.status_code().as_u16(),
            details,
        })
    }
}

impl From<ResendError> for RelayError {
    fn from(err: ResendError) -> Self {
        match err {
            ResendError::Rejected { message, details } => {
                RelayError::ProviderRejected { message, details }
            }
            other => RelayError::UnexpectedFailure(other.to_string()),
        }
    }
}

impl From<ExportError> for RelayError {
    fn from(err: ExportError) -> Self {
        RelayError::UnexpectedFailure(err.to_string())
    }
}
