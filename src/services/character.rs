// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Character data service.
//!
//! [`CharacterService`] holds one [`CharacterSource`], chosen at startup:
//! [`LiveSource`] talks to the Blizzard API, `FixtureSource` serves canned
//! data when no credentials are configured.

use crate::error::ApiError;
use crate::models::character::LOCALE;
use crate::models::pvp::{bracket_slug_from_href, PvpBracketResponse, PvpSummaryResponse};
use crate::models::{
    AggregatedCharacterResult, CharacterEquipment, CharacterIdentity, CharacterProfile,
    MediaAssets, PvpBracketStat, PvpLeaderboard, PvpSeasonIndex, PvpSummary, Region,
};
use crate::services::blizzard::BlizzardClient;
use crate::time_utils::epoch_millis_to_rfc3339;
use async_trait::async_trait;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Character search with optional filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub name: String,
    #[serde(default)]
    pub region: Region,
    #[serde(default)]
    pub realm: Option<String>,
    #[serde(default)]
    pub character_class: Option<u32>,
    #[serde(default)]
    pub race: Option<u32>,
}

/// Where character data comes from.
#[async_trait]
pub trait CharacterSource: Send + Sync {
    async fn profile(&self, identity: &CharacterIdentity) -> Result<CharacterProfile, ApiError>;
    /// PvP summary with every bracket's detail resolved.
    async fn pvp_summary(&self, identity: &CharacterIdentity) -> Result<PvpSummary, ApiError>;
    async fn pvp_bracket(
        &self,
        identity: &CharacterIdentity,
        bracket: &str,
    ) -> Result<PvpBracketStat, ApiError>;
    async fn media(&self, identity: &CharacterIdentity) -> Result<MediaAssets, ApiError>;
    async fn equipment(&self, identity: &CharacterIdentity) -> Result<CharacterEquipment, ApiError>;
    async fn achievements(&self, identity: &CharacterIdentity) -> Result<Value, ApiError>;
    async fn statistics(&self, identity: &CharacterIdentity) -> Result<Value, ApiError>;
    async fn search(&self, filters: &SearchFilters) -> Result<Value, ApiError>;
    async fn leaderboard(
        &self,
        region: Region,
        bracket: &str,
        season: Option<u32>,
    ) -> Result<PvpLeaderboard, ApiError>;
    async fn current_season(&self, region: Region) -> Result<PvpSeasonIndex, ApiError>;
    async fn season_rewards(&self, region: Region, season_id: u32) -> Result<Value, ApiError>;
    async fn regions(&self, region: Region) -> Result<Value, ApiError>;
    async fn realms(&self, region: Region) -> Result<Value, ApiError>;
    /// Whether the source can currently reach its data.
    async fn check_connection(&self) -> bool;

    fn is_mock(&self) -> bool {
        false
    }
}

fn profile_query(region: Region) -> Vec<(&'static str, String)> {
    vec![
        ("namespace", region.profile_namespace()),
        ("locale", LOCALE.to_string()),
    ]
}

fn dynamic_query(region: Region) -> Vec<(&'static str, String)> {
    vec![
        ("namespace", region.dynamic_namespace()),
        ("locale", LOCALE.to_string()),
    ]
}

// ─── Live source ─────────────────────────────────────────────

/// Character data from the Blizzard API.
#[derive(Clone)]
pub struct LiveSource {
    client: BlizzardClient,
}

impl LiveSource {
    pub fn new(client: BlizzardClient) -> Self {
        Self { client }
    }

    async fn profile_resource<T: serde::de::DeserializeOwned>(
        &self,
        identity: &CharacterIdentity,
        resource: &str,
    ) -> Result<T, ApiError> {
        let path = format!("{}/{}", identity.profile_path(), resource);
        self.client
            .get(&path, &profile_query(identity.region()))
            .await
    }

    /// Fetch one bracket link. Links normally carry their namespace already.
    async fn bracket_from_link(
        &self,
        href: &str,
        region: Region,
    ) -> Result<PvpBracketResponse, ApiError> {
        let query = if href.contains("namespace=") {
            vec![("locale", LOCALE.to_string())]
        } else {
            profile_query(region)
        };
        self.client.get_url(href, &query).await
    }
}

#[async_trait]
impl CharacterSource for LiveSource {
    async fn profile(&self, identity: &CharacterIdentity) -> Result<CharacterProfile, ApiError> {
        self.client
            .get(&identity.profile_path(), &profile_query(identity.region()))
            .await
    }

    /// The summary only links to each bracket, so every link is fetched
    /// concurrently. A bracket that fails is logged and left out.
    async fn pvp_summary(&self, identity: &CharacterIdentity) -> Result<PvpSummary, ApiError> {
        let raw: PvpSummaryResponse = self.profile_resource(identity, "pvp-summary").await?;
        let mut summary = PvpSummary::from_response(&raw);

        let fetches: Vec<_> = raw
            .brackets
            .iter()
            .filter_map(|link| {
                let Some(slug) = bracket_slug_from_href(&link.href) else {
                    tracing::warn!(href = %link.href, "Bracket link without slug, skipping");
                    return None;
                };
                Some(async move {
                    let outcome = self.bracket_from_link(&link.href, identity.region()).await;
                    (slug, outcome)
                })
            })
            .collect();

        for (slug, outcome) in join_all(fetches).await {
            match outcome {
                Ok(response) => {
                    summary
                        .brackets
                        .insert(slug.to_string(), PvpBracketStat::from_response(slug, response));
                }
                Err(e) => {
                    tracing::warn!(
                        character = %identity,
                        bracket = slug,
                        error = %e,
                        "Failed to fetch PvP bracket, omitting"
                    );
                }
            }
        }

        tracing::debug!(
            character = %identity,
            brackets = summary.brackets.len(),
            "PvP summary resolved"
        );
        Ok(summary)
    }

    async fn pvp_bracket(
        &self,
        identity: &CharacterIdentity,
        bracket: &str,
    ) -> Result<PvpBracketStat, ApiError> {
        let resource = format!("pvp-bracket/{}", urlencoding::encode(bracket));
        let response: PvpBracketResponse = self.profile_resource(identity, &resource).await?;
        Ok(PvpBracketStat::from_response(bracket, response))
    }

    async fn media(&self, identity: &CharacterIdentity) -> Result<MediaAssets, ApiError> {
        self.profile_resource(identity, "character-media").await
    }

    async fn equipment(&self, identity: &CharacterIdentity) -> Result<CharacterEquipment, ApiError> {
        self.profile_resource(identity, "equipment").await
    }

    async fn achievements(&self, identity: &CharacterIdentity) -> Result<Value, ApiError> {
        self.profile_resource(identity, "achievements").await
    }

    async fn statistics(&self, identity: &CharacterIdentity) -> Result<Value, ApiError> {
        self.profile_resource(identity, "statistics").await
    }

    async fn search(&self, filters: &SearchFilters) -> Result<Value, ApiError> {
        let mut query = profile_query(filters.region);
        query.push(("name.en_US", filters.name.clone()));
        if let Some(realm) = &filters.realm {
            query.push(("realm", realm.clone()));
        }
        if let Some(class_id) = filters.character_class {
            query.push(("character_class", class_id.to_string()));
        }
        if let Some(race_id) = filters.race {
            query.push(("race", race_id.to_string()));
        }

        self.client.get("/data/wow/search/character", &query).await
    }

    async fn leaderboard(
        &self,
        region: Region,
        bracket: &str,
        season: Option<u32>,
    ) -> Result<PvpLeaderboard, ApiError> {
        let season = season.map(|s| format!("/{}", s)).unwrap_or_default();
        let path = format!(
            "/data/wow/pvp-season{}/pvp-leaderboard/{}",
            season,
            urlencoding::encode(bracket)
        );
        self.client.get(&path, &dynamic_query(region)).await
    }

    async fn current_season(&self, region: Region) -> Result<PvpSeasonIndex, ApiError> {
        self.client
            .get("/data/wow/pvp-season/index", &dynamic_query(region))
            .await
    }

    async fn season_rewards(&self, region: Region, season_id: u32) -> Result<Value, ApiError> {
        let path = format!("/data/wow/pvp-season/{}/pvp-reward/index", season_id);
        self.client.get(&path, &dynamic_query(region)).await
    }

    async fn regions(&self, region: Region) -> Result<Value, ApiError> {
        self.client
            .get("/data/wow/region/index", &dynamic_query(region))
            .await
    }

    async fn realms(&self, region: Region) -> Result<Value, ApiError> {
        self.client
            .get("/data/wow/realm/index", &dynamic_query(region))
            .await
    }

    async fn check_connection(&self) -> bool {
        self.client.tokens().check_connection().await
    }
}

// ─── Service ─────────────────────────────────────────────────

/// Character lookups plus the composite operations built on them.
#[derive(Clone)]
pub struct CharacterService {
    source: Arc<dyn CharacterSource>,
}

impl CharacterService {
    pub fn new(source: Arc<dyn CharacterSource>) -> Self {
        Self { source }
    }

    pub fn live(client: BlizzardClient) -> Self {
        Self::new(Arc::new(LiveSource::new(client)))
    }

    pub fn is_mock(&self) -> bool {
        self.source.is_mock()
    }

    pub async fn get_character_profile(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<CharacterProfile, ApiError> {
        self.source.profile(identity).await
    }

    pub async fn get_character_pvp_summary(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<PvpSummary, ApiError> {
        self.source.pvp_summary(identity).await
    }

    pub async fn get_character_pvp_bracket(
        &self,
        identity: &CharacterIdentity,
        bracket: &str,
    ) -> Result<PvpBracketStat, ApiError> {
        self.source.pvp_bracket(identity, bracket).await
    }

    pub async fn get_character_media(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<MediaAssets, ApiError> {
        self.source.media(identity).await
    }

    pub async fn get_character_equipment(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<CharacterEquipment, ApiError> {
        self.source.equipment(identity).await
    }

    pub async fn get_character_achievements(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<Value, ApiError> {
        self.source.achievements(identity).await
    }

    pub async fn get_character_statistics(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<Value, ApiError> {
        self.source.statistics(identity).await
    }

    pub async fn search_characters(&self, filters: &SearchFilters) -> Result<Value, ApiError> {
        self.source.search(filters).await
    }

    pub async fn get_pvp_leaderboard(
        &self,
        region: Region,
        bracket: &str,
        season: Option<u32>,
    ) -> Result<PvpLeaderboard, ApiError> {
        self.source.leaderboard(region, bracket, season).await
    }

    pub async fn get_current_pvp_season(&self, region: Region) -> Result<PvpSeasonIndex, ApiError> {
        self.source.current_season(region).await
    }

    pub async fn get_pvp_season_rewards(
        &self,
        region: Region,
        season_id: u32,
    ) -> Result<Value, ApiError> {
        self.source.season_rewards(region, season_id).await
    }

    pub async fn get_regions(&self, region: Region) -> Result<Value, ApiError> {
        self.source.regions(region).await
    }

    pub async fn get_realms(&self, region: Region) -> Result<Value, ApiError> {
        self.source.realms(region).await
    }

    pub async fn check_connection(&self) -> bool {
        self.source.check_connection().await
    }

    /// `true` if the character exists, `false` if the API says 404.
    /// Any other failure is returned as an error.
    pub async fn validate_character(&self, identity: &CharacterIdentity) -> Result<bool, ApiError> {
        match self.source.profile(identity).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Profile, PvP, media and equipment fetched concurrently.
    ///
    /// Never fails: parts that could not be loaded are left empty and the
    /// first failure is reported in `error`.
    pub async fn get_full_character_data(
        &self,
        identity: &CharacterIdentity,
    ) -> AggregatedCharacterResult {
        let (profile, pvp, media, equipment) = tokio::join!(
            self.source.profile(identity),
            self.source.pvp_summary(identity),
            self.source.media(identity),
            self.source.equipment(identity),
        );

        let result =
            AggregatedCharacterResult::fold(identity.clone(), profile, pvp, media, equipment);

        let last_login = result
            .profile
            .as_ref()
            .and_then(|p| p.last_login_timestamp)
            .and_then(epoch_millis_to_rfc3339);
        tracing::info!(
            character = %identity,
            complete = result.is_complete(),
            last_login = last_login.as_deref().unwrap_or("unknown"),
            "Full character data fetched"
        );
        result
    }
}
