//! HTTP error handling and response types.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Locale, UPSTREAM_URL_ENV};
use crate::relay::{body_snippet, RelayOutcome};

/// API error response body.
///
/// Only `error` is always present; the other fields depend on the failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Short description of the failure
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Upstream HTTP status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Upstream body, verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Final upstream URL after redirects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_snippet: Option<String>,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Default::default()
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Missing environment variable: {0}")]
    MissingConfig(&'static str),
    #[error("Bad response from GAS")]
    UpstreamStatus { status: u16, body: String },
    #[error("Non-JSON response from GAS")]
    UpstreamNonJson {
        content_type: String,
        final_url: String,
        snippet: String,
        hint: Option<String>,
    },
    #[error("Fetch failed")]
    Fetch(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::MissingConfig(_) | AppError::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UpstreamStatus { .. } | AppError::UpstreamNonJson { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    pub fn to_body(&self) -> ApiError {
        let base = ApiError::new(self.to_string());
        match self {
            AppError::MethodNotAllowed | AppError::MissingConfig(_) => base,
            AppError::UpstreamStatus { status, body } => ApiError {
                status: Some(*status),
                body: Some(body.clone()),
                ..base
            },
            AppError::UpstreamNonJson {
                content_type,
                final_url,
                snippet,
                hint,
            } => ApiError {
                hint: hint.clone(),
                content_type: Some(content_type.clone()),
                url: Some(final_url.clone()),
                body_snippet: Some(snippet.clone()),
                ..base
            },
            AppError::Fetch(message) => ApiError {
                message: Some(message.clone()),
                ..base
            },
        }
    }

    /// Split a relay outcome into its JSON payload or the matching error.
    pub fn from_outcome(outcome: RelayOutcome, locale: Locale) -> Result<serde_json::Value, Self> {
        match outcome {
            RelayOutcome::Success(json) => Ok(json),
            RelayOutcome::ConfigError => Err(AppError::MissingConfig(UPSTREAM_URL_ENV)),
            RelayOutcome::UpstreamError { status, body } => {
                Err(AppError::UpstreamStatus { status, body })
            }
            RelayOutcome::NonJsonResponse {
                content_type,
                body,
                final_url,
                cause,
            } => Err(AppError::UpstreamNonJson {
                content_type,
                final_url,
                snippet: body_snippet(&body),
                hint: cause.hint(locale).map(str::to_string),
            }),
            RelayOutcome::TransportError(message) => Err(AppError::Fetch(message)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_body());
        match self {
            AppError::MethodNotAllowed => {
                (status, [(header::ALLOW, "GET")], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}
