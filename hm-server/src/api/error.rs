//! JSON API error responses.
//!
//! All API failures render as `{ "error": { "code", "message", "field"? } }`
//! with a status code matching the error class.

use crate::workflows::WorkflowError;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: String,
        field: Option<&'static str>,
    },

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    Forbidden { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Upstream { message: String },

    #[error("Step '{step}' failed: {message}")]
    PartialFailure { step: &'static str, message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Upstream { .. } | Self::PartialFailure { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Upstream { .. } => "UPSTREAM_UNAVAILABLE",
            Self::PartialFailure { .. } => "PARTIAL_FAILURE",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("API error: {}", self);
        }

        let mut body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });

        if let Self::Validation {
            field: Some(field), ..
        } = &self
        {
            body["error"]["field"] = json!(field);
        }

        (status, Json(body)).into_response()
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::InvalidPayload { field, message } => Self::Validation {
                message,
                field: Some(field),
            },
            WorkflowError::IdentityMismatch => Self::Forbidden {
                message: err.to_string(),
            },
            WorkflowError::Upstream { .. } => Self::Upstream {
                message: err.to_string(),
            },
            WorkflowError::PartialFailure { step, message } => {
                Self::PartialFailure { step, message }
            }
        }
    }
}

impl From<hm_db::DbError> for ApiError {
    fn from(err: hm_db::DbError) -> Self {
        if err.is_not_found() {
            Self::NotFound {
                message: err.to_string(),
            }
        } else {
            Self::Internal {
                message: err.to_string(),
            }
        }
    }
}

impl From<hm_auth::AuthError> for ApiError {
    fn from(err: hm_auth::AuthError) -> Self {
        Self::Upstream {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
