// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod blizzard;
pub mod character;
pub mod fixtures;
pub mod token;

pub use blizzard::BlizzardClient;
pub use character::{CharacterService, CharacterSource, LiveSource, SearchFilters};
pub use fixtures::FixtureSource;
pub use token::{TokenProvider, TokenResponse};
