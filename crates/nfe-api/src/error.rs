//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Exactly two failure classes reach clients: validation rejections (400,
//! carrying the full violation list) and provider failures (500, carrying
//! a normalized envelope). Persistence failures belong to neither class:
//! the issuance sink only logs them and never alters a response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nfe_core::Violation;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::state::Environment;

/// Body of every 400 validation response.
///
/// The violation list is the validator's output, verbatim and in rule
/// order. Nothing is summarized or truncated.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorBody {
    /// One entry per violated rule: `{ "field": ..., "message": ... }`.
    #[schema(value_type = Vec<Object>)]
    pub errors: Vec<Violation>,
}

/// Body of every 500 provider-failure response.
///
/// `message` names the operation that failed in the API's own words;
/// `details` renders the underlying cause. `stack` is captured only in
/// development and omitted from the JSON entirely otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Operation-level description, e.g. "Erro ao emitir nota fiscal".
    pub message: String,
    /// The underlying error, rendered for diagnosis.
    pub details: String,
    /// Captured backtrace, present only in development.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Normalize any failure into the uniform 500 envelope.
///
/// Total over its inputs: every error value produces an envelope, and the
/// envelope is logged via `tracing::error!` before being returned so the
/// operator record exists even if the response is never delivered.
pub fn format_error_response(
    environment: Environment,
    message: &str,
    error: &dyn std::error::Error,
) -> ErrorEnvelope {
    let details = error.to_string();
    let stack = match environment {
        Environment::Development => {
            Some(std::backtrace::Backtrace::force_capture().to_string())
        }
        Environment::Production => None,
    };

    tracing::error!(details = %details, "{message}");

    ErrorEnvelope {
        message: message.to_string(),
        details,
        stack,
    }
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request failed validation (400). Carries every violation found.
    #[error("validation failed with {} violation(s)", .0.len())]
    Validation(Vec<Violation>),

    /// Provider call failed (500). Carries the normalized envelope.
    #[error("{}", .0.message)]
    Upstream(ErrorEnvelope),
}

impl AppError {
    /// Build an `Upstream` error through the normalizer.
    ///
    /// `message` is the operation-level description the client sees;
    /// `error` is the cause being wrapped.
    pub fn upstream(
        environment: Environment,
        message: &str,
        error: &dyn std::error::Error,
    ) -> Self {
        Self::Upstream(format_error_response(environment, message, error))
    }

    /// Return the HTTP status code for this error.
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Validation(violations) => {
                let body = ValidationErrorBody { errors: violations };
                (status, Json(body)).into_response()
            }
            Self::Upstream(envelope) => (status, Json(envelope)).into_response(),
        }
    }
}
