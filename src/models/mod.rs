// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod aggregate;
pub mod character;
pub mod media;
pub mod pvp;

pub use aggregate::AggregatedCharacterResult;
pub use character::{realm_slug, CharacterIdentity, CharacterProfile, IdentityError, Region};
pub use media::{CharacterEquipment, MediaAssets};
pub use pvp::{
    MatchStatistics, PvpBracketStat, PvpLeaderboard, PvpSeasonIndex, PvpSummary, RatingTier,
};
