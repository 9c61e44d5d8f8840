// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Blizzard game-data API client.
//!
//! Handles:
//! - Bearer token injection from the shared [`TokenProvider`]
//! - One re-authentication retry when a request comes back 401
//! - Normalizing every failure into an [`ApiError`]

use crate::error::ApiError;
use crate::services::token::TokenProvider;
use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Query parameters as sent to the API.
pub type Query<'a> = [(&'a str, String)];

/// Authenticated transport for the game-data API.
#[derive(Clone)]
pub struct BlizzardClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenProvider>,
}

impl BlizzardClient {
    pub fn new(base_url: impl Into<String>, http: reqwest::Client, tokens: Arc<TokenProvider>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// HTTP client with the per-request timeout applied.
    pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder().timeout(timeout).build()
    }

    pub fn tokens(&self) -> &Arc<TokenProvider> {
        &self.tokens
    }

    /// GET a path relative to the API base URL.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query<'_>) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        self.get_url(&url, query).await
    }

    /// GET an absolute URL, e.g. a `href` link from another resource.
    pub async fn get_url<T: DeserializeOwned>(&self, url: &str, query: &Query<'_>) -> Result<T, ApiError> {
        self.send_authenticated(|token| {
            let request = self.http.get(url).query(query);
            match token {
                Some(token) => request.bearer_auth(token),
                None => request,
            }
        })
        .await
    }

    /// POST a JSON body to a path relative to the API base URL.
    pub async fn post<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        self.send_authenticated(|token| {
            let mut request = self.http.post(&url);
            if let Some(body) = body {
                request = request.json(body);
            }
            match token {
                Some(token) => request.bearer_auth(token),
                None => request,
            }
        })
        .await
    }

    /// Send with the current token; on 401 drop it, fetch a fresh one and
    /// retry exactly once.
    async fn send_authenticated<T, F>(&self, build: F) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: Fn(Option<&str>) -> RequestBuilder,
    {
        let token = self.tokens.get_token().await;
        let response = send(build(token.as_deref())).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return read_json(response).await;
        }

        if let Some(rejected) = token.as_deref() {
            self.tokens.invalidate(rejected).await;
        }

        let Some(fresh) = self.tokens.get_token().await else {
            return read_json(response).await;
        };

        tracing::info!(url = %response.url(), "Retrying request with refreshed token");
        let retried = send(build(Some(&fresh))).await?;
        read_json(retried).await
    }
}

async fn send(request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
    request
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| ApiError::from_reqwest(&e))
}

/// Check response status and parse the JSON body.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Blizzard rate limit hit (429)");
        }
        return Err(ApiError::from_status(status, &body));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::from_reqwest(&e))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::api(status.as_u16(), format!("JSON parse error: {}", e)))
}
