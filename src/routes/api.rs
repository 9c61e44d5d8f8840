// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Character lookup and PvP API routes.

use crate::error::{AppError, Result};
use crate::models::pvp::bracket_display_name;
use crate::models::{CharacterIdentity, RatingTier, Region};
use crate::services::SearchFilters;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

// Freshness windows (seconds) for Cache-Control.
const PROFILE_MAX_AGE: u32 = 5 * 60;
const PVP_MAX_AGE: u32 = 2 * 60;
const MEDIA_MAX_AGE: u32 = 30 * 60;
const SEARCH_MAX_AGE: u32 = 60;
const LEADERBOARD_MAX_AGE: u32 = 10 * 60;
const SEASON_MAX_AGE: u32 = 60 * 60;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/characters/{region}/{realm}/{name}", get(get_full_character))
        .route(
            "/api/characters/{region}/{realm}/{name}/profile",
            get(get_profile),
        )
        .route("/api/characters/{region}/{realm}/{name}/pvp", get(get_pvp))
        .route(
            "/api/characters/{region}/{realm}/{name}/pvp/{bracket}",
            get(get_pvp_bracket),
        )
        .route("/api/characters/{region}/{realm}/{name}/media", get(get_media))
        .route(
            "/api/characters/{region}/{realm}/{name}/equipment",
            get(get_equipment),
        )
        .route(
            "/api/characters/{region}/{realm}/{name}/achievements",
            get(get_achievements),
        )
        .route(
            "/api/characters/{region}/{realm}/{name}/statistics",
            get(get_statistics),
        )
        .route(
            "/api/characters/{region}/{realm}/{name}/validate",
            get(validate_character),
        )
        .route("/api/search", get(search_characters))
        .route("/api/pvp/{region}/season", get(get_current_season))
        .route(
            "/api/pvp/{region}/season/{season_id}/rewards",
            get(get_season_rewards),
        )
        .route(
            "/api/pvp/{region}/leaderboard/{bracket}",
            get(get_leaderboard),
        )
        .route("/api/regions/{region}", get(get_regions))
        .route("/api/realms/{region}", get(get_realms))
        .route("/api/tier", get(get_tier))
}

/// JSON body with a `Cache-Control` freshness window.
fn cached<T: Serialize>(max_age: u32, body: T) -> Response {
    (
        [(header::CACHE_CONTROL, format!("public, max-age={}", max_age))],
        Json(body),
    )
        .into_response()
}

fn uncached<T: Serialize>(body: T) -> Response {
    ([(header::CACHE_CONTROL, "no-store")], Json(body)).into_response()
}

fn parse_region(region: &str) -> Result<Region> {
    region
        .parse()
        .map_err(|e: crate::models::character::UnknownRegion| AppError::BadRequest(e.to_string()))
}

/// `{region}/{realm}/{name}` path segments.
#[derive(Deserialize)]
struct CharacterPath {
    region: String,
    realm: String,
    name: String,
}

impl CharacterPath {
    fn identity(&self) -> Result<CharacterIdentity> {
        let region = parse_region(&self.region)?;
        CharacterIdentity::new(&self.name, &self.realm, region)
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

// ─── Characters ──────────────────────────────────────────────

/// Profile, PvP, media and equipment in one response. Always 200; partial
/// failures are reported in the body's `error` field and are not cacheable.
async fn get_full_character(
    State(state): State<Arc<AppState>>,
    Path(path): Path<CharacterPath>,
) -> Result<Response> {
    let identity = path.identity()?;
    let result = state.characters.get_full_character_data(&identity).await;
    if !result.is_complete() {
        return Ok(uncached(result));
    }
    Ok(cached(PROFILE_MAX_AGE, result))
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(path): Path<CharacterPath>,
) -> Result<Response> {
    let identity = path.identity()?;
    let profile = state.characters.get_character_profile(&identity).await?;
    Ok(cached(PROFILE_MAX_AGE, profile))
}

async fn get_pvp(
    State(state): State<Arc<AppState>>,
    Path(path): Path<CharacterPath>,
) -> Result<Response> {
    let identity = path.identity()?;
    let summary = state.characters.get_character_pvp_summary(&identity).await?;
    Ok(cached(PVP_MAX_AGE, summary))
}

#[derive(Deserialize)]
struct BracketPath {
    region: String,
    realm: String,
    name: String,
    bracket: String,
}

async fn get_pvp_bracket(
    State(state): State<Arc<AppState>>,
    Path(path): Path<BracketPath>,
) -> Result<Response> {
    let identity = CharacterPath {
        region: path.region,
        realm: path.realm,
        name: path.name,
    }
    .identity()?;
    let stat = state
        .characters
        .get_character_pvp_bracket(&identity, &path.bracket)
        .await?;
    Ok(cached(PVP_MAX_AGE, stat))
}

async fn get_media(
    State(state): State<Arc<AppState>>,
    Path(path): Path<CharacterPath>,
) -> Result<Response> {
    let identity = path.identity()?;
    let media = state.characters.get_character_media(&identity).await?;
    Ok(cached(MEDIA_MAX_AGE, media))
}

async fn get_equipment(
    State(state): State<Arc<AppState>>,
    Path(path): Path<CharacterPath>,
) -> Result<Response> {
    let identity = path.identity()?;
    let equipment = state.characters.get_character_equipment(&identity).await?;
    Ok(cached(PROFILE_MAX_AGE, equipment))
}

async fn get_achievements(
    State(state): State<Arc<AppState>>,
    Path(path): Path<CharacterPath>,
) -> Result<Response> {
    let identity = path.identity()?;
    let achievements = state.characters.get_character_achievements(&identity).await?;
    Ok(cached(PROFILE_MAX_AGE, achievements))
}

async fn get_statistics(
    State(state): State<Arc<AppState>>,
    Path(path): Path<CharacterPath>,
) -> Result<Response> {
    let identity = path.identity()?;
    let statistics = state.characters.get_character_statistics(&identity).await?;
    Ok(cached(PROFILE_MAX_AGE, statistics))
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub exists: bool,
}

async fn validate_character(
    State(state): State<Arc<AppState>>,
    Path(path): Path<CharacterPath>,
) -> Result<Json<ValidateResponse>> {
    let identity = path.identity()?;
    let exists = state.characters.validate_character(&identity).await?;
    Ok(Json(ValidateResponse { exists }))
}

// ─── Search ──────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct SearchParams {
    /// Character name (or prefix) to search for
    #[validate(length(min = 2, max = 12))]
    name: String,
    region: Option<String>,
    realm: Option<String>,
    character_class: Option<u32>,
    race: Option<u32>,
}

async fn search_characters(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Response> {
    params
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let region = match params.region.as_deref() {
        Some(r) => parse_region(r)?,
        None => Region::default(),
    };

    let filters = SearchFilters {
        name: params.name,
        region,
        realm: params.realm.map(|r| crate::models::realm_slug(&r)),
        character_class: params.character_class,
        race: params.race,
    };

    let results = state.characters.search_characters(&filters).await?;
    Ok(cached(SEARCH_MAX_AGE, results))
}

// ─── PvP seasons and leaderboards ────────────────────────────

async fn get_current_season(
    State(state): State<Arc<AppState>>,
    Path(region): Path<String>,
) -> Result<Response> {
    let region = parse_region(&region)?;
    let season = state.characters.get_current_pvp_season(region).await?;
    Ok(cached(SEASON_MAX_AGE, season))
}

async fn get_season_rewards(
    State(state): State<Arc<AppState>>,
    Path((region, season_id)): Path<(String, u32)>,
) -> Result<Response> {
    let region = parse_region(&region)?;
    let rewards = state
        .characters
        .get_pvp_season_rewards(region, season_id)
        .await?;
    Ok(cached(SEASON_MAX_AGE, rewards))
}

#[derive(Deserialize)]
struct LeaderboardParams {
    season: Option<u32>,
}

async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Path((region, bracket)): Path<(String, String)>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Response> {
    let region = parse_region(&region)?;
    let leaderboard = state
        .characters
        .get_pvp_leaderboard(region, &bracket, params.season)
        .await?;
    Ok(cached(LEADERBOARD_MAX_AGE, leaderboard))
}

// ─── Game data ───────────────────────────────────────────────

async fn get_regions(
    State(state): State<Arc<AppState>>,
    Path(region): Path<String>,
) -> Result<Response> {
    let region = parse_region(&region)?;
    let regions = state.characters.get_regions(region).await?;
    Ok(cached(SEASON_MAX_AGE, regions))
}

async fn get_realms(
    State(state): State<Arc<AppState>>,
    Path(region): Path<String>,
) -> Result<Response> {
    let region = parse_region(&region)?;
    let realms = state.characters.get_realms(region).await?;
    Ok(cached(SEASON_MAX_AGE, realms))
}

// ─── Rating tiers ────────────────────────────────────────────

#[derive(Deserialize)]
struct TierParams {
    rating: u32,
    #[serde(default)]
    wins: u32,
    bracket: Option<String>,
}

#[derive(Serialize)]
pub struct TierResponse {
    pub tier: RatingTier,
    pub name: &'static str,
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bracket_name: Option<String>,
}

/// Classify a rating without any upstream call.
async fn get_tier(Query(params): Query<TierParams>) -> Json<TierResponse> {
    let tier = RatingTier::classify(params.rating, params.wins);
    Json(TierResponse {
        tier,
        name: tier.name(),
        color: tier.color(),
        bracket_name: params.bracket.as_deref().map(bracket_display_name),
    })
}
