// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! WoW PvP Lookup: character profiles and PvP ratings from the Blizzard API
//!
//! This crate provides the backend API for the character lookup front end:
//! token management, the Blizzard API client, and the aggregation of
//! profile, PvP and media data into one response.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{BlizzardClient, CharacterService, FixtureSource, TokenProvider};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub characters: CharacterService,
    /// Present only when live credentials are configured.
    pub tokens: Option<Arc<TokenProvider>>,
}

impl AppState {
    /// Pick the data source once: live API when credentials exist, fixtures otherwise.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let Some(blizzard) = config.blizzard.clone() else {
            tracing::warn!(
                latency = ?config.mock_latency,
                "Blizzard credentials not configured, serving fixture data"
            );
            let characters =
                CharacterService::new(Arc::new(FixtureSource::new(config.mock_latency)));
            return Ok(Self {
                config,
                characters,
                tokens: None,
            });
        };

        let http = BlizzardClient::http_client(config.request_timeout)?;
        let tokens = Arc::new(TokenProvider::new(&blizzard, http.clone()));
        let client = BlizzardClient::new(&blizzard.api_base_url, http, tokens.clone());

        tracing::info!(api = %blizzard.api_base_url, "Using live Blizzard API");
        Ok(Self {
            config,
            characters: CharacterService::live(client),
            tokens: Some(tokens),
        })
    }

    pub fn is_mock_mode(&self) -> bool {
        self.characters.is_mock()
    }
}
