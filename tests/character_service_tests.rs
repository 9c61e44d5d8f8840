// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Character service against a mocked Blizzard API.

use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wow_pvp_lookup::models::{RatingTier, Region};
use wow_pvp_lookup::services::{BlizzardClient, CharacterService, SearchFilters, TokenProvider};

mod common;
use common::{blizzard_config, bracket_json, media_json, mount_token, profile_json, thrall};

const PROFILE_PATH: &str = "/profile/wow/character/stormrage/thrall";

async fn live_service(server: &MockServer) -> CharacterService {
    mount_token(server, "token", 3600).await;
    let http = BlizzardClient::http_client(Duration::from_secs(2)).expect("http client");
    let tokens = Arc::new(TokenProvider::new(&blizzard_config(server), http.clone()));
    CharacterService::live(BlizzardClient::new(&server.uri(), http, tokens))
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

fn summary_json(server: &MockServer, slugs: &[&str]) -> serde_json::Value {
    let brackets: Vec<_> = slugs
        .iter()
        .map(|slug| {
            serde_json::json!({
                "href": format!(
                    "{}{}/pvp-bracket/{}?namespace=profile-us",
                    server.uri(),
                    PROFILE_PATH,
                    slug
                )
            })
        })
        .collect();

    serde_json::json!({
        "brackets": brackets,
        "honor_level": 112,
        "honorable_kills": 40211,
        "pvp_map_statistics": []
    })
}

#[tokio::test]
async fn test_profile_uses_profile_namespace() {
    let server = MockServer::start().await;
    let service = live_service(&server).await;

    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .and(query_param("namespace", "profile-us"))
        .and(query_param("locale", "en_US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json("Thrall")))
        .expect(1)
        .mount(&server)
        .await;

    let profile = service
        .get_character_profile(&thrall())
        .await
        .expect("profile should load");

    assert_eq!(profile.name, "Thrall");
    assert_eq!(profile.level, 80);
    assert!(!profile.is_alliance());
}

#[tokio::test]
async fn test_pvp_summary_resolves_every_bracket() {
    let server = MockServer::start().await;
    let service = live_service(&server).await;

    mount_json(
        &server,
        &format!("{}/pvp-summary", PROFILE_PATH),
        summary_json(&server, &["2v2", "3v3"]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/pvp-bracket/2v2", PROFILE_PATH)))
        .and(query_param("namespace", "profile-us"))
        .and(query_param("locale", "en_US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bracket_json(1850, 40, 35)))
        .expect(1)
        .mount(&server)
        .await;
    mount_json(
        &server,
        &format!("{}/pvp-bracket/3v3", PROFILE_PATH),
        bracket_json(2450, 75, 20),
    )
    .await;

    let summary = service
        .get_character_pvp_summary(&thrall())
        .await
        .expect("summary should load");

    assert_eq!(summary.honor_level, 112);
    assert_eq!(summary.honorable_kills, 40211);
    assert_eq!(summary.brackets.len(), 2);
    assert_eq!(summary.brackets["2v2"].rating, 1850);
    assert_eq!(summary.brackets["2v2"].tier, RatingTier::Rival);
    assert_eq!(summary.brackets["3v3"].tier, RatingTier::Gladiator);
    assert_eq!(summary.highest_rated().unwrap().bracket_slug, "3v3");
}

#[tokio::test]
async fn test_failed_bracket_is_omitted() {
    let server = MockServer::start().await;
    let service = live_service(&server).await;

    mount_json(
        &server,
        &format!("{}/pvp-summary", PROFILE_PATH),
        summary_json(&server, &["2v2", "3v3", "shuffle-shaman-enhancement"]),
    )
    .await;
    mount_json(
        &server,
        &format!("{}/pvp-bracket/2v2", PROFILE_PATH),
        bracket_json(1500, 10, 10),
    )
    .await;
    mount_status(&server, &format!("{}/pvp-bracket/3v3", PROFILE_PATH), 500).await;
    mount_json(
        &server,
        &format!("{}/pvp-bracket/shuffle-shaman-enhancement", PROFILE_PATH),
        bracket_json(2100, 120, 100),
    )
    .await;

    let summary = service
        .get_character_pvp_summary(&thrall())
        .await
        .expect("a failed bracket must not fail the summary");

    assert_eq!(summary.brackets.len(), 2);
    assert!(summary.brackets.contains_key("2v2"));
    assert!(!summary.brackets.contains_key("3v3"));
    assert_eq!(
        summary.solo_shuffle().unwrap().bracket_slug,
        "shuffle-shaman-enhancement"
    );
}

#[tokio::test]
async fn test_bracket_link_reauthenticates_on_401() {
    let server = MockServer::start().await;

    // The first exchange yields a token the bracket endpoint rejects.
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "revoked",
            "expires_in": 3600
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_token(&server, "fresh", 3600).await;

    let http = BlizzardClient::http_client(Duration::from_secs(2)).expect("http client");
    let tokens = Arc::new(TokenProvider::new(&blizzard_config(&server), http.clone()));
    let service = CharacterService::live(BlizzardClient::new(&server.uri(), http, tokens.clone()));

    mount_json(
        &server,
        &format!("{}/pvp-summary", PROFILE_PATH),
        summary_json(&server, &["3v3"]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/pvp-bracket/3v3", PROFILE_PATH)))
        .and(header("authorization", "Bearer revoked"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/pvp-bracket/3v3", PROFILE_PATH)))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bracket_json(2250, 50, 40)))
        .expect(1)
        .mount(&server)
        .await;

    let summary = service
        .get_character_pvp_summary(&thrall())
        .await
        .expect("summary should load");

    assert_eq!(summary.brackets.len(), 1);
    assert_eq!(summary.brackets["3v3"].rating, 2250);
    assert_eq!(tokens.exchange_count(), 2);
}

#[tokio::test]
async fn test_pvp_summary_without_brackets() {
    let server = MockServer::start().await;
    let service = live_service(&server).await;

    mount_json(
        &server,
        &format!("{}/pvp-summary", PROFILE_PATH),
        serde_json::json!({"honor_level": 3}),
    )
    .await;

    let summary = service.get_character_pvp_summary(&thrall()).await.unwrap();
    assert_eq!(summary.honor_level, 3);
    assert!(summary.brackets.is_empty());
    assert!(summary.highest_rated().is_none());
}

#[tokio::test]
async fn test_full_data_is_fail_soft() {
    let server = MockServer::start().await;
    let service = live_service(&server).await;

    mount_status(&server, PROFILE_PATH, 500).await;
    mount_json(
        &server,
        &format!("{}/pvp-summary", PROFILE_PATH),
        summary_json(&server, &[]),
    )
    .await;
    mount_json(
        &server,
        &format!("{}/character-media", PROFILE_PATH),
        media_json(),
    )
    .await;
    mount_json(
        &server,
        &format!("{}/equipment", PROFILE_PATH),
        serde_json::json!({"equipped_items": []}),
    )
    .await;

    let identity = thrall();
    let result = service.get_full_character_data(&identity).await;

    assert!(result.is_for(&identity));
    assert!(result.profile.is_none());
    assert!(result.pvp.is_some());
    assert!(result.media.is_some());
    assert!(result.equipment.is_some());
    assert!(!result.is_complete());
    assert!(result.error.unwrap().contains("500"));
}

#[tokio::test]
async fn test_full_data_complete() {
    let server = MockServer::start().await;
    let service = live_service(&server).await;

    mount_json(&server, PROFILE_PATH, profile_json("Thrall")).await;
    mount_json(
        &server,
        &format!("{}/pvp-summary", PROFILE_PATH),
        summary_json(&server, &["3v3"]),
    )
    .await;
    mount_json(
        &server,
        &format!("{}/pvp-bracket/3v3", PROFILE_PATH),
        bracket_json(2200, 30, 30),
    )
    .await;
    mount_json(
        &server,
        &format!("{}/character-media", PROFILE_PATH),
        media_json(),
    )
    .await;
    mount_json(
        &server,
        &format!("{}/equipment", PROFILE_PATH),
        serde_json::json!({"equipped_items": []}),
    )
    .await;

    let result = service.get_full_character_data(&thrall()).await;

    assert!(result.is_complete());
    assert_eq!(result.profile.unwrap().name, "Thrall");
    assert_eq!(result.pvp.unwrap().brackets["3v3"].tier, RatingTier::Duelist);
    assert_eq!(
        result.media.unwrap().main_render(),
        Some("https://render.example/main-raw.png")
    );
}

#[tokio::test]
async fn test_validate_character() {
    let server = MockServer::start().await;
    let service = live_service(&server).await;

    mount_json(&server, PROFILE_PATH, profile_json("Thrall")).await;
    mount_status(&server, "/profile/wow/character/stormrage/nobody", 404).await;
    mount_status(&server, "/profile/wow/character/stormrage/broken", 503).await;

    let realm = |name: &str| {
        wow_pvp_lookup::models::CharacterIdentity::new(name, "Stormrage", Region::Us).unwrap()
    };

    assert!(service.validate_character(&thrall()).await.unwrap());
    assert!(!service.validate_character(&realm("Nobody")).await.unwrap());

    let err = service
        .validate_character(&realm("Broken"))
        .await
        .expect_err("non-404 failures propagate");
    assert_eq!(err.code, 503);
}

#[tokio::test]
async fn test_search_passes_filters() {
    let server = MockServer::start().await;
    let service = live_service(&server).await;

    Mock::given(method("GET"))
        .and(path("/data/wow/search/character"))
        .and(query_param("name.en_US", "thrall"))
        .and(query_param("realm", "area-52"))
        .and(query_param("character_class", "7"))
        .and(query_param("namespace", "profile-eu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let filters = SearchFilters {
        name: "thrall".to_string(),
        region: Region::Eu,
        realm: Some("area-52".to_string()),
        character_class: Some(7),
        race: None,
    };
    let results = service.search_characters(&filters).await.unwrap();
    assert_eq!(results["results"], serde_json::json!([]));
}

#[tokio::test]
async fn test_leaderboard_paths() {
    let server = MockServer::start().await;
    let service = live_service(&server).await;

    let board = serde_json::json!({
        "name": "3v3",
        "season": {"id": 37},
        "entries": [{
            "character": {"name": "Topplayer", "id": 1, "realm": {"slug": "mal-ganis"}},
            "faction": {"type": "HORDE"},
            "rank": 1,
            "rating": 3127,
            "season_match_statistics": {"played": 279, "won": 234, "lost": 45}
        }]
    });

    Mock::given(method("GET"))
        .and(path("/data/wow/pvp-season/37/pvp-leaderboard/3v3"))
        .and(query_param("namespace", "dynamic-us"))
        .respond_with(ResponseTemplate::new(200).set_body_json(board.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/wow/pvp-season/pvp-leaderboard/3v3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(board))
        .expect(1)
        .mount(&server)
        .await;

    let seasonal = service
        .get_pvp_leaderboard(Region::Us, "3v3", Some(37))
        .await
        .unwrap();
    assert_eq!(seasonal.entries[0].character.name, "Topplayer");

    let current = service
        .get_pvp_leaderboard(Region::Us, "3v3", None)
        .await
        .unwrap();
    assert_eq!(current.entries.len(), 1);
}

#[tokio::test]
async fn test_current_season() {
    let server = MockServer::start().await;
    let service = live_service(&server).await;

    Mock::given(method("GET"))
        .and(path("/data/wow/pvp-season/index"))
        .and(query_param("namespace", "dynamic-kr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "seasons": [{"id": 38}, {"id": 39}],
            "current_season": {"id": 39}
        })))
        .mount(&server)
        .await;

    let index = service.get_current_pvp_season(Region::Kr).await.unwrap();
    assert_eq!(index.current_season.id, 39);
    assert_eq!(index.seasons.len(), 2);
}
