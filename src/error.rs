// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Normalized error for any failed call against the game-data API.
///
/// `type` distinguishes an upstream error status (`API_ERROR`, or the
/// upstream's own type code when its body carries one), a request that got
/// no response (`NETWORK_ERROR`) and a request that could not be sent
/// (`REQUEST_ERROR`). The latter two always have `code == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{error_type} ({code}): {detail}")]
pub struct ApiError {
    pub code: u16,
    #[serde(rename = "type")]
    pub error_type: String,
    pub detail: String,
}

impl ApiError {
    pub const API_ERROR: &'static str = "API_ERROR";
    pub const NETWORK_ERROR: &'static str = "NETWORK_ERROR";
    pub const REQUEST_ERROR: &'static str = "REQUEST_ERROR";

    /// Upstream answered with an error status.
    pub fn api(code: u16, detail: impl Into<String>) -> Self {
        Self {
            code,
            error_type: Self::API_ERROR.to_string(),
            detail: detail.into(),
        }
    }

    /// No response was received (timeout, DNS, connection reset).
    pub fn network(detail: impl Into<String>) -> Self {
        Self {
            code: 0,
            error_type: Self::NETWORK_ERROR.to_string(),
            detail: detail.into(),
        }
    }

    /// The request could not be constructed or sent.
    pub fn request(detail: impl Into<String>) -> Self {
        Self {
            code: 0,
            error_type: Self::REQUEST_ERROR.to_string(),
            detail: detail.into(),
        }
    }

    /// Build from an error status and whatever body the upstream returned.
    ///
    /// Blizzard error bodies look like `{"code":404,"type":"BLZWEBAPI00000404","detail":"Not Found"}`;
    /// missing fields fall back to `API_ERROR` and the status reason.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        #[derive(Deserialize)]
        struct UpstreamErrorBody {
            #[serde(rename = "type")]
            error_type: Option<String>,
            detail: Option<String>,
        }

        let parsed = serde_json::from_str::<UpstreamErrorBody>(body).ok();
        let (error_type, detail) = match parsed {
            Some(b) => (b.error_type, b.detail),
            None => (None, None),
        };

        Self {
            code: status.as_u16(),
            error_type: error_type.unwrap_or_else(|| Self::API_ERROR.to_string()),
            detail: detail.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown API error")
                    .to_string()
            }),
        }
    }

    /// Classify a transport-level failure from reqwest.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_builder() {
            return Self::request(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::api(status.as_u16(), err.to_string());
        }
        if err.is_timeout() {
            return Self::network(format!("Request timed out: {}", err));
        }
        if err.is_connect() || err.is_request() || err.is_body() {
            return Self::network(format!("No response received from server: {}", err));
        }
        Self::request(err.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        self.code == 404
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == 401
    }
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Blizzard API error: {0}")]
    Upstream(#[from] ApiError),

    #[error("Token exchange failed with status {status}")]
    TokenExchange { status: u16, detail: String },

    #[error("API credentials not configured")]
    NotConfigured,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "not_found",
                Some(serde_json::Value::String(msg.clone())),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                Some(serde_json::Value::String(msg.clone())),
            ),
            AppError::Upstream(err) => {
                let status = if err.is_not_found() {
                    StatusCode::NOT_FOUND
                } else {
                    tracing::warn!(code = err.code, kind = %err.error_type, detail = %err.detail, "Upstream error");
                    StatusCode::BAD_GATEWAY
                };
                (status, "blizzard_error", serde_json::to_value(err).ok())
            }
            AppError::TokenExchange { status, detail } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                "Failed to authenticate with Blizzard API",
                Some(serde_json::Value::String(detail.clone())),
            ),
            AppError::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "API credentials not configured",
                None,
            ),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
