// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! PvP summary, bracket, rating tier and leaderboard models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Won/lost/played counters for a bracket or battleground map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStatistics {
    #[serde(default)]
    pub played: u32,
    #[serde(default)]
    pub won: u32,
    #[serde(default)]
    pub lost: u32,
}

impl MatchStatistics {
    /// Win percentage rounded to the nearest integer; 0 when nothing was played.
    pub fn win_rate(&self) -> u32 {
        if self.played == 0 {
            return 0;
        }
        (f64::from(self.won) / f64::from(self.played) * 100.0).round() as u32
    }
}

// ─── Rating tiers ────────────────────────────────────────────

/// Seasonal rating tier. Ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RatingTier {
    Unranked,
    Combatant,
    Challenger,
    Rival,
    Duelist,
    Elite,
    Gladiator,
}

/// Wins at 2400+ needed for Gladiator.
pub const GLADIATOR_WINS: u32 = 50;

impl RatingTier {
    /// Classify a rating. Wins only matter at 2400 and above.
    pub fn classify(rating: u32, wins: u32) -> Self {
        match rating {
            r if r >= 2400 && wins >= GLADIATOR_WINS => RatingTier::Gladiator,
            r if r >= 2400 => RatingTier::Elite,
            r if r >= 2100 => RatingTier::Duelist,
            r if r >= 1800 => RatingTier::Rival,
            r if r >= 1400 => RatingTier::Challenger,
            r if r >= 1000 => RatingTier::Combatant,
            _ => RatingTier::Unranked,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RatingTier::Unranked => "Unranked",
            RatingTier::Combatant => "Combatant",
            RatingTier::Challenger => "Challenger",
            RatingTier::Rival => "Rival",
            RatingTier::Duelist => "Duelist",
            RatingTier::Elite => "Elite",
            RatingTier::Gladiator => "Gladiator",
        }
    }

    /// Display color for the tier's rating band.
    pub fn color(&self) -> &'static str {
        match self {
            RatingTier::Gladiator | RatingTier::Elite => "#C084FC",
            RatingTier::Duelist => "#60A5FA",
            RatingTier::Rival => "#4ADE80",
            RatingTier::Challenger => "#FACC15",
            RatingTier::Combatant => "#9CA3AF",
            RatingTier::Unranked => "#6B7280",
        }
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name for a bracket slug, e.g. `rbg` -> `Rated Battlegrounds`.
pub fn bracket_display_name(slug: &str) -> String {
    match slug {
        "2v2" => "2v2 Arena".to_string(),
        "3v3" => "3v3 Arena".to_string(),
        "rbg" => "Rated Battlegrounds".to_string(),
        s if s.starts_with("shuffle") => "Solo Shuffle".to_string(),
        s if s.starts_with("blitz") => "Battleground Blitz".to_string(),
        s => capitalize_words(s),
    }
}

fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}

/// Abbreviate large counts: 2547 -> `2.5K`, 1200000 -> `1.2M`.
pub fn format_number(n: u64) -> String {
    match n {
        n if n >= 1_000_000_000 => format!("{:.1}B", n as f64 / 1e9),
        n if n >= 1_000_000 => format!("{:.1}M", n as f64 / 1e6),
        n if n >= 1_000 => format!("{:.1}K", n as f64 / 1e3),
        n => n.to_string(),
    }
}

// ─── Upstream shapes ─────────────────────────────────────────

/// `{href}` link to another resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRef {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvpMapStatistic {
    pub world_map: MapRef,
    pub match_statistics: MatchStatistics,
}

/// Raw `pvp-summary` resource: brackets are links, not data.
#[derive(Debug, Clone, Deserialize)]
pub struct PvpSummaryResponse {
    #[serde(default)]
    pub brackets: Vec<Link>,
    #[serde(default)]
    pub honor_level: u32,
    #[serde(default)]
    pub honorable_kills: u32,
    #[serde(default)]
    pub pvp_map_statistics: Vec<PvpMapStatistic>,
}

/// Raw `pvp-bracket/{slug}` resource (only the fields we keep).
#[derive(Debug, Clone, Deserialize)]
pub struct PvpBracketResponse {
    #[serde(default)]
    pub rating: u32,
    #[serde(default)]
    pub season_match_statistics: MatchStatistics,
}

/// Bracket slug from the last path segment of a bracket link, query stripped.
///
/// `.../pvp-bracket/shuffle-warrior-arms?namespace=profile-us` -> `shuffle-warrior-arms`
pub fn bracket_slug_from_href(href: &str) -> Option<&str> {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
}

// ─── Merged summary ──────────────────────────────────────────

/// Rating and season record for one rated bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvpBracketStat {
    pub bracket_slug: String,
    pub rating: u32,
    pub match_stats: MatchStatistics,
    pub tier: RatingTier,
}

impl PvpBracketStat {
    pub fn new(bracket_slug: impl Into<String>, rating: u32, match_stats: MatchStatistics) -> Self {
        Self {
            bracket_slug: bracket_slug.into(),
            rating,
            match_stats,
            tier: RatingTier::classify(rating, match_stats.won),
        }
    }

    pub fn from_response(bracket_slug: &str, response: PvpBracketResponse) -> Self {
        Self::new(
            bracket_slug,
            response.rating,
            response.season_match_statistics,
        )
    }

    pub fn display_name(&self) -> String {
        bracket_display_name(&self.bracket_slug)
    }
}

/// PvP summary with every bracket's detail resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PvpSummary {
    pub honor_level: u32,
    pub honorable_kills: u32,
    #[serde(default)]
    pub pvp_map_statistics: Vec<PvpMapStatistic>,
    pub brackets: BTreeMap<String, PvpBracketStat>,
}

impl PvpSummary {
    /// Summary counters from the raw resource, with no brackets yet.
    pub fn from_response(response: &PvpSummaryResponse) -> Self {
        Self {
            honor_level: response.honor_level,
            honorable_kills: response.honorable_kills,
            pvp_map_statistics: response.pvp_map_statistics.clone(),
            brackets: BTreeMap::new(),
        }
    }

    /// Bracket with the highest rating, if any are rated.
    pub fn highest_rated(&self) -> Option<&PvpBracketStat> {
        self.brackets.values().max_by_key(|b| b.rating)
    }

    /// First Solo Shuffle bracket (slugs are per-spec, e.g. `shuffle-mage-frost`).
    pub fn solo_shuffle(&self) -> Option<&PvpBracketStat> {
        self.brackets
            .values()
            .find(|b| b.bracket_slug.contains("shuffle"))
    }
}

// ─── Seasons and leaderboards ────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRef {
    pub id: u32,
}

/// `pvp-season/index` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvpSeasonIndex {
    #[serde(default)]
    pub seasons: Vec<SeasonRef>,
    pub current_season: SeasonRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRealm {
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardCharacter {
    pub name: String,
    #[serde(default)]
    pub id: u64,
    pub realm: LeaderboardRealm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionType {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub character: LeaderboardCharacter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction: Option<FactionType>,
    pub rank: u32,
    pub rating: u32,
    #[serde(default)]
    pub season_match_statistics: MatchStatistics,
}

/// `pvp-season/{id}/pvp-leaderboard/{bracket}` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvpLeaderboard {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<SeasonRef>,
    #[serde(default)]
    pub entries: Vec<LeaderboardEntry>,
}
