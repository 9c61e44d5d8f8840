// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::Response;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wow_pvp_lookup::config::{BlizzardConfig, Config};
use wow_pvp_lookup::models::{CharacterIdentity, Region};
use wow_pvp_lookup::routes::create_router;
use wow_pvp_lookup::AppState;

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";

/// Blizzard settings pointing both the API and OAuth at a mock server.
#[allow(dead_code)]
pub fn blizzard_config(server: &MockServer) -> BlizzardConfig {
    BlizzardConfig {
        client_id: CLIENT_ID.to_string(),
        client_secret: CLIENT_SECRET.to_string(),
        api_base_url: server.uri(),
        oauth_url: server.uri(),
    }
}

/// Live-mode config against a mock server.
#[allow(dead_code)]
pub fn live_config(server: &MockServer) -> Config {
    Config {
        blizzard: Some(blizzard_config(server)),
        request_timeout: Duration::from_secs(2),
        ..Config::test_default()
    }
}

/// Live-mode state against a mock server.
#[allow(dead_code)]
pub fn live_state(server: &MockServer) -> Arc<AppState> {
    Arc::new(AppState::from_config(live_config(server)).expect("live state should build"))
}

/// Create a test app in mock mode (fixture data, no latency).
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(
        AppState::from_config(Config::test_default()).expect("mock state should build"),
    );
    (create_router(state.clone()), state)
}

/// Answer every credential exchange with `token`.
#[allow(dead_code)]
pub async fn mount_token(server: &MockServer, token: &str, expires_in: i64) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": token,
            "token_type": "bearer",
            "expires_in": expires_in,
        })))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub fn thrall() -> CharacterIdentity {
    CharacterIdentity::new("Thrall", "Stormrage", Region::Us).expect("valid identity")
}

/// Profile body in the upstream shape.
#[allow(dead_code)]
pub fn profile_json(name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": 42,
        "name": name,
        "realm": {"id": 60, "name": "Stormrage", "slug": "stormrage"},
        "level": 80,
        "character_class": {"id": 7, "name": "Shaman"},
        "race": {"id": 2, "name": "Orc"},
        "faction": {"type": "HORDE", "name": "Horde"},
        "active_spec": {"id": 263, "name": "Enhancement"},
        "guild": {"id": 9, "name": "Warchiefs"},
        "achievement_points": 20000,
        "equipped_item_level": 610,
        "last_login_timestamp": 1_700_000_000_000_i64
    })
}

#[allow(dead_code)]
pub fn media_json() -> serde_json::Value {
    serde_json::json!({
        "assets": [
            {"key": "avatar", "value": "https://render.example/avatar.jpg"},
            {"key": "main-raw", "value": "https://render.example/main-raw.png"}
        ]
    })
}

#[allow(dead_code)]
pub fn bracket_json(rating: u32, won: u32, lost: u32) -> serde_json::Value {
    serde_json::json!({
        "bracket": {"id": 1, "type": "ARENA"},
        "rating": rating,
        "season_match_statistics": {"played": won + lost, "won": won, "lost": lost},
        "weekly_match_statistics": {"played": 0, "won": 0, "lost": 0}
    })
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
