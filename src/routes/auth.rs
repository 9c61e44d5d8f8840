// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-credential token route.
//!
//! Exchanges the server-side client id/secret for a bearer token so the
//! secret never reaches the browser.

use axum::{extract::State, routing::post, Json, Router};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::services::TokenResponse;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/auth/token", post(issue_token))
}

/// `POST /api/auth/token` -> `{access_token, expires_in}`, or `{error}` with
/// the upstream status on failure.
async fn issue_token(State(state): State<Arc<AppState>>) -> Result<Json<TokenResponse>> {
    let Some(tokens) = state.tokens.as_ref() else {
        tracing::error!("Missing Blizzard API credentials");
        return Err(AppError::NotConfigured);
    };

    let response = tokens.exchange().await?;
    tracing::info!(expires_in = response.expires_in, "Issued access token");
    Ok(Json(response))
}
