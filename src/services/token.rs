// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth client-credential token acquisition and caching.

use crate::config::BlizzardConfig;
use crate::error::{ApiError, AppError};
use crate::time_utils::{Clock, SystemClock};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Subtracted from the advertised lifetime so a token is never used right at expiry.
const TOKEN_SAFETY_MARGIN_SECS: i64 = 60;

/// Longest token lifetime accepted from the token endpoint (30 days).
const MAX_TOKEN_LIFETIME_SECS: i64 = 30 * 24 * 60 * 60;

/// Successful credential exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
}

/// Whatever the token endpoint sent back; errors come as `{error}`.
#[derive(Deserialize)]
struct RawTokenBody {
    access_token: Option<String>,
    expires_in: Option<i64>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Owns the bearer token used for every game-data request.
///
/// A cached token is returned while `now < expires_at`. Refreshes are
/// serialized so concurrent callers wait for one exchange instead of each
/// running their own.
pub struct TokenProvider {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    clock: Arc<dyn Clock>,
    cached: RwLock<Option<CachedToken>>,
    refresh_lock: Mutex<()>,
    exchanges: AtomicU64,
}

impl TokenProvider {
    pub fn new(config: &BlizzardConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            token_url: config.token_url(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            clock: Arc::new(SystemClock),
            cached: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            exchanges: AtomicU64::new(0),
        }
    }

    /// Replace the clock used for expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Number of credential exchanges attempted so far.
    pub fn exchange_count(&self) -> u64 {
        self.exchanges.load(Ordering::Relaxed)
    }

    /// Current valid token, exchanging credentials if needed.
    ///
    /// Returns `None` when the exchange fails; callers proceed without a
    /// token and let the downstream request fail on its own.
    pub async fn get_token(&self) -> Option<String> {
        if let Some(token) = self.cached_valid().await {
            return Some(token);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another task may have refreshed while we were waiting.
        if let Some(token) = self.cached_valid().await {
            return Some(token);
        }

        match self.exchange().await {
            Ok(response) => {
                let Some(expires_at) = self.expiry_for(response.expires_in) else {
                    tracing::error!(
                        expires_in = response.expires_in,
                        "Token lifetime out of range, not caching"
                    );
                    return None;
                };

                *self.cached.write().await = Some(CachedToken {
                    value: response.access_token.clone(),
                    expires_at,
                });

                tracing::debug!(expires_in = response.expires_in, "Access token cached");
                Some(response.access_token)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to get access token");
                None
            }
        }
    }

    /// Drop the cached token after the API rejected it.
    ///
    /// Only clears the cache if it still holds `rejected`, so a token that a
    /// concurrent refresh just stored survives.
    pub async fn invalidate(&self, rejected: &str) {
        let mut cached = self.cached.write().await;
        if cached.as_ref().is_some_and(|t| t.value == rejected) {
            *cached = None;
            tracing::info!("Access token rejected by API, cache cleared");
        }
    }

    /// Whether a token can currently be obtained.
    pub async fn check_connection(&self) -> bool {
        self.get_token().await.is_some()
    }

    /// Run one client-credential exchange without touching the cache.
    pub async fn exchange(&self) -> Result<TokenResponse, AppError> {
        self.exchanges.fetch_add(1, Ordering::Relaxed);

        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| AppError::Upstream(ApiError::from_reqwest(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Upstream(ApiError::from_reqwest(&e)))?;
        let parsed = serde_json::from_str::<RawTokenBody>(&body).ok();

        if !status.is_success() {
            let detail = parsed
                .and_then(|b| b.error_description.or(b.error))
                .unwrap_or_else(|| status.to_string());
            tracing::error!(status = %status, detail = %detail, "Token exchange failed");
            return Err(AppError::TokenExchange {
                status: status.as_u16(),
                detail,
            });
        }

        match parsed {
            Some(RawTokenBody {
                error: Some(error), ..
            }) => Err(AppError::TokenExchange {
                status: status.as_u16(),
                detail: error,
            }),
            Some(RawTokenBody {
                access_token: Some(access_token),
                expires_in: Some(expires_in),
                ..
            }) if (1..=MAX_TOKEN_LIFETIME_SECS).contains(&expires_in) => Ok(TokenResponse {
                access_token,
                expires_in,
            }),
            _ => Err(AppError::TokenExchange {
                status: 502,
                detail: "Malformed token response".to_string(),
            }),
        }
    }

    /// `now + expires_in - margin`, or `None` if that is not representable.
    fn expiry_for(&self, expires_in: i64) -> Option<DateTime<Utc>> {
        let lifetime = Duration::try_seconds(expires_in)?;
        let margin = Duration::try_seconds(TOKEN_SAFETY_MARGIN_SECS)?;
        self.clock
            .now()
            .checked_add_signed(lifetime)?
            .checked_sub_signed(margin)
    }

    async fn cached_valid(&self) -> Option<String> {
        let now = self.clock.now();
        self.cached
            .read()
            .await
            .as_ref()
            .filter(|t| now < t.expires_at)
            .map(|t| t.value.clone())
    }
}
