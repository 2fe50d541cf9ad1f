use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Missing required fields: {}", .required.join(", "))]
    MissingField { required: Vec<String> },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Credential rejected by the completion service: {0}")]
    AuthError(String),

    #[error("Completion service unavailable: {0}")]
    TransportError(String),

    #[error("Completion service returned an error (status {status})")]
    UpstreamError { status: u16, detail: String },

    #[error("Completion service returned no usable content")]
    EmptyCompletion,

    #[error("{0}")]
    ExtractionFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingField { .. } => "MISSING_FIELD",
            AppError::InvalidPayload(_) => "INVALID_PAYLOAD",
            AppError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            AppError::AuthError(_) => "AUTH_ERROR",
            AppError::TransportError(_) => "SERVICE_UNAVAILABLE",
            AppError::UpstreamError { .. } => "UPSTREAM_ERROR",
            AppError::EmptyCompletion => "EMPTY_COMPLETION",
            AppError::ExtractionFailed(_) => "EXTRACTION_FAILED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller may reasonably try the same request again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::TransportError(_) | AppError::EmptyCompletion | AppError::ExtractionFailed(_)
        )
    }

    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AppError::MissingField {
            required: fields.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub retryable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let required = match err {
            AppError::MissingField { required } => Some(required.clone()),
            _ => None,
        };
        let details = match err {
            AppError::UpstreamError { detail, .. } => Some(detail.clone()),
            _ => None,
        };

        ErrorResponse {
            error: err.error_code().to_string(),
            message: err.to_string(),
            code: err.status_code().as_u16(),
            retryable: err.is_retryable(),
            required,
            details,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingField { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::TransportError(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UpstreamError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::EmptyCompletion => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ExtractionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::from(self))
    }
}

impl AppError {
    /// `MissingField` naming each failing field of a validated DTO by its
    /// wire name, in the order given by `fields`.
    pub fn from_validation(err: &validator::ValidationErrors, fields: &[&str]) -> Self {
        let failing = err.errors();
        AppError::MissingField {
            required: fields
                .iter()
                .copied()
                .filter(|field| failing.contains_key(*field))
                .map(wire_name)
                .collect(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::UpstreamError {
                status: err.status().map(|s| s.as_u16()).unwrap_or(200),
                detail: format!("Malformed completion payload: {}", err),
            }
        } else {
            AppError::TransportError(err.to_string())
        }
    }
}

/// Request DTO fields are snake_case in Rust and camelCase on the wire.
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub type AppResult<T> = Result<T, AppError>;
