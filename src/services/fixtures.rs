// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fixture data served when no Blizzard credentials are configured.
//!
//! Every lookup resolves to the same test character after a short delay so
//! loading states still show up in the front end.

use crate::error::ApiError;
use crate::models::character::{NamedRef, RealmRef, TypedName};
use crate::models::media::{EquippedItem, ItemLevel, MediaAsset};
use crate::models::pvp::{
    FactionType, LeaderboardCharacter, LeaderboardEntry, LeaderboardRealm, MapRef, PvpMapStatistic,
    SeasonRef,
};
use crate::models::{
    CharacterEquipment, CharacterIdentity, CharacterProfile, MatchStatistics, MediaAssets,
    PvpBracketStat, PvpLeaderboard, PvpSeasonIndex, PvpSummary, Region,
};
use crate::services::character::{CharacterSource, SearchFilters};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Duration;

const CURRENT_SEASON: u32 = 39;

fn typed(kind: &str, name: &str) -> TypedName {
    TypedName {
        kind: kind.to_string(),
        name: name.to_string(),
    }
}

fn named(id: u64, name: &str) -> NamedRef {
    NamedRef {
        id,
        name: name.to_string(),
    }
}

fn stats(won: u32, lost: u32) -> MatchStatistics {
    MatchStatistics {
        played: won + lost,
        won,
        lost,
    }
}

/// The test character's profile. Last login is one hour before now.
pub fn fixture_profile() -> CharacterProfile {
    CharacterProfile {
        id: 123456789,
        name: "Testcharacter".to_string(),
        realm: RealmRef {
            id: 52,
            name: "Stormrage".to_string(),
            slug: "stormrage".to_string(),
        },
        level: 80,
        character_class: named(1, "Warrior"),
        race: named(1, "Human"),
        faction: typed("ALLIANCE", "Alliance"),
        gender: Some(typed("MALE", "Male")),
        active_spec: Some(named(71, "Arms")),
        guild: None,
        achievement_points: 15420,
        average_item_level: Some(589),
        equipped_item_level: Some(594),
        last_login_timestamp: Some(Utc::now().timestamp_millis() - 3_600_000),
    }
}

pub fn fixture_pvp_summary() -> PvpSummary {
    let brackets: BTreeMap<String, PvpBracketStat> = [
        PvpBracketStat::new("2v2", 2156, stats(62, 27)),
        PvpBracketStat::new("3v3", 2401, stats(98, 58)),
    ]
    .into_iter()
    .map(|b| (b.bracket_slug.clone(), b))
    .collect();

    PvpSummary {
        honor_level: 500,
        honorable_kills: 2547,
        pvp_map_statistics: vec![PvpMapStatistic {
            world_map: MapRef {
                id: 1,
                name: "Warsong Gulch".to_string(),
            },
            match_statistics: stats(32, 13),
        }],
        brackets,
    }
}

pub fn fixture_media() -> MediaAssets {
    let asset = |key: &str, value: &str| MediaAsset {
        key: key.to_string(),
        value: value.to_string(),
    };
    MediaAssets {
        assets: vec![
            asset(
                "avatar",
                "https://render.worldofwarcraft.com/us/character/stormrage/123/456789-avatar.jpg",
            ),
            asset(
                "main",
                "https://render.worldofwarcraft.com/us/character/stormrage/123/456789-main.jpg",
            ),
        ],
    }
}

pub fn fixture_equipment() -> CharacterEquipment {
    let item = |slot: &str, slot_name: &str, name: &str, level: u32| EquippedItem {
        slot: typed(slot, slot_name),
        name: name.to_string(),
        quality: Some(typed("EPIC", "Epic")),
        level: Some(ItemLevel { value: level }),
    };
    CharacterEquipment {
        equipped_items: vec![
            item("HEAD", "Head", "Forged Gladiator's Plate Helm", 597),
            item("CHEST", "Chest", "Forged Gladiator's Plate Chestpiece", 594),
            item("MAIN_HAND", "Main Hand", "Forged Gladiator's Greatsword", 600),
        ],
    }
}

pub fn fixture_leaderboard(bracket: &str, season: u32) -> PvpLeaderboard {
    let entry = |rank, rating, name: &str, realm: &str, faction: &str, won, lost| LeaderboardEntry {
        character: LeaderboardCharacter {
            name: name.to_string(),
            id: 0,
            realm: LeaderboardRealm {
                slug: realm.to_string(),
            },
        },
        faction: Some(FactionType {
            kind: faction.to_string(),
        }),
        rank,
        rating,
        season_match_statistics: stats(won, lost),
    };

    PvpLeaderboard {
        name: bracket.to_string(),
        season: Some(SeasonRef { id: season }),
        entries: vec![
            entry(1, 3127, "Topplayer", "mal-ganis", "HORDE", 234, 45),
            entry(2, 3089, "Secondbest", "tichondrius", "ALLIANCE", 198, 52),
        ],
    }
}

fn fixture_search_results() -> Value {
    json!({
        "page": 1,
        "pageSize": 2,
        "maxPageSize": 100,
        "pageCount": 1,
        "results": [
            {
                "name": "Testcharacter",
                "realm": "stormrage",
                "level": 80,
                "class": "Warrior",
                "race": "Human",
                "faction": "Alliance",
                "guild": "Test Guild"
            },
            {
                "name": "Anothertoon",
                "realm": "stormrage",
                "level": 80,
                "class": "Paladin",
                "race": "Human",
                "faction": "Alliance",
                "guild": "Elite Raiders"
            }
        ]
    })
}

/// Canned character data with simulated latency. Never touches the network.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    latency: Duration,
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

impl FixtureSource {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl CharacterSource for FixtureSource {
    async fn profile(&self, identity: &CharacterIdentity) -> Result<CharacterProfile, ApiError> {
        tracing::debug!(character = %identity, "Serving fixture profile");
        self.delay().await;
        Ok(fixture_profile())
    }

    async fn pvp_summary(&self, _identity: &CharacterIdentity) -> Result<PvpSummary, ApiError> {
        self.delay().await;
        Ok(fixture_pvp_summary())
    }

    async fn pvp_bracket(
        &self,
        _identity: &CharacterIdentity,
        bracket: &str,
    ) -> Result<PvpBracketStat, ApiError> {
        self.delay().await;
        fixture_pvp_summary()
            .brackets
            .remove(bracket)
            .ok_or_else(|| ApiError::api(404, "Not Found"))
    }

    async fn media(&self, _identity: &CharacterIdentity) -> Result<MediaAssets, ApiError> {
        self.delay().await;
        Ok(fixture_media())
    }

    async fn equipment(&self, _identity: &CharacterIdentity) -> Result<CharacterEquipment, ApiError> {
        self.delay().await;
        Ok(fixture_equipment())
    }

    async fn achievements(&self, _identity: &CharacterIdentity) -> Result<Value, ApiError> {
        self.delay().await;
        Ok(json!({
            "total_quantity": 2846,
            "total_points": 15420,
            "achievements": []
        }))
    }

    async fn statistics(&self, _identity: &CharacterIdentity) -> Result<Value, ApiError> {
        self.delay().await;
        Ok(json!({
            "health": 5_921_440,
            "power": 100,
            "power_type": {"id": 1, "name": "Rage"},
            "strength": {"base": 2840, "effective": 92_311}
        }))
    }

    async fn search(&self, _filters: &SearchFilters) -> Result<Value, ApiError> {
        self.delay().await;
        Ok(fixture_search_results())
    }

    async fn leaderboard(
        &self,
        _region: Region,
        bracket: &str,
        season: Option<u32>,
    ) -> Result<PvpLeaderboard, ApiError> {
        self.delay().await;
        Ok(fixture_leaderboard(bracket, season.unwrap_or(CURRENT_SEASON)))
    }

    async fn current_season(&self, _region: Region) -> Result<PvpSeasonIndex, ApiError> {
        self.delay().await;
        Ok(PvpSeasonIndex {
            seasons: (CURRENT_SEASON - 2..=CURRENT_SEASON)
                .map(|id| SeasonRef { id })
                .collect(),
            current_season: SeasonRef { id: CURRENT_SEASON },
        })
    }

    async fn season_rewards(&self, _region: Region, season_id: u32) -> Result<Value, ApiError> {
        self.delay().await;
        Ok(json!({
            "season": {"id": season_id},
            "rewards": [
                {"bracket": {"type": "ARENA_3v3"}, "achievement": {"name": "Gladiator"}, "rating_cutoff": 2400}
            ]
        }))
    }

    async fn regions(&self, region: Region) -> Result<Value, ApiError> {
        self.delay().await;
        Ok(json!({ "regions": [{"href": format!("fixture://region/{}", region)}] }))
    }

    async fn realms(&self, _region: Region) -> Result<Value, ApiError> {
        self.delay().await;
        Ok(json!({
            "realms": [
                {"id": 52, "name": "Stormrage", "slug": "stormrage"},
                {"id": 3684, "name": "Mal'Ganis", "slug": "mal-ganis"},
                {"id": 11, "name": "Tichondrius", "slug": "tichondrius"}
            ]
        }))
    }

    async fn check_connection(&self) -> bool {
        true
    }

    fn is_mock(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_tiers() {
        let summary = fixture_pvp_summary();
        assert_eq!(summary.brackets["2v2"].tier.name(), "Duelist");
        assert_eq!(summary.brackets["3v3"].tier.name(), "Gladiator");
        assert_eq!(summary.highest_rated().unwrap().bracket_slug, "3v3");
    }

    #[tokio::test]
    async fn test_unknown_bracket_is_not_found() {
        let source = FixtureSource::new(Duration::ZERO);
        let identity = CharacterIdentity::new("Testcharacter", "Stormrage", Region::Us).unwrap();
        let err = source.pvp_bracket(&identity, "rbg").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
