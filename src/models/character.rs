// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Character identity and profile models.

use crate::time_utils::format_relative_time;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Locale used for every upstream request.
pub const LOCALE: &str = "en_US";

/// Upstream API region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Us,
    Eu,
    Kr,
    Tw,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Us => "us",
            Region::Eu => "eu",
            Region::Kr => "kr",
            Region::Tw => "tw",
        }
    }

    /// Namespace for character (profile) resources, e.g. `profile-us`.
    pub fn profile_namespace(&self) -> String {
        format!("profile-{}", self.as_str())
    }

    /// Namespace for game data that changes between patches, e.g. `dynamic-eu`.
    pub fn dynamic_namespace(&self) -> String {
        format!("dynamic-{}", self.as_str())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown region: {0}")]
pub struct UnknownRegion(pub String);

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "us" => Ok(Region::Us),
            "eu" => Ok(Region::Eu),
            "kr" => Ok(Region::Kr),
            "tw" => Ok(Region::Tw),
            _ => Err(UnknownRegion(s.to_string())),
        }
    }
}

/// Convert a realm display name to its slug, e.g. `Mal'Ganis` -> `mal-ganis`.
pub fn realm_slug(realm_name: &str) -> String {
    let mut slug = String::with_capacity(realm_name.len());
    let mut pending_hyphen = false;

    for c in realm_name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Character names are 2-12 letters, capitalized.
pub fn is_valid_character_name(name: &str) -> bool {
    let mut chars = name.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_uppercase());
    let rest: Vec<char> = chars.collect();

    first_ok && (1..=11).contains(&rest.len()) && rest.iter().all(|c| c.is_ascii_lowercase())
}

/// Lookup key for every character resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterIdentity {
    name: String,
    realm_slug: String,
    region: Region,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Character name must not be empty")]
    EmptyName,
    #[error("Realm must contain at least one letter or digit")]
    EmptyRealm,
}

impl CharacterIdentity {
    /// Build an identity from a character name and a free-text realm name.
    pub fn new(name: &str, realm: &str, region: Region) -> Result<Self, IdentityError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(IdentityError::EmptyName);
        }

        let realm_slug = realm_slug(realm);
        if realm_slug.is_empty() {
            return Err(IdentityError::EmptyRealm);
        }

        Ok(Self {
            name: name.to_string(),
            realm_slug,
            region,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn realm_slug(&self) -> &str {
        &self.realm_slug
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// `/profile/wow/character/{realm}/{name}` with the name lower-cased.
    pub fn profile_path(&self) -> String {
        format!(
            "/profile/wow/character/{}/{}",
            urlencoding::encode(&self.realm_slug),
            urlencoding::encode(&self.name.to_lowercase())
        )
    }
}

impl fmt::Display for CharacterIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} ({})", self.name, self.realm_slug, self.region)
    }
}

// ─── Profile ─────────────────────────────────────────────────

/// `{type, name}` pair used for gender, faction and roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedName {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

/// `{id, name}` reference to another upstream resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealmRef {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildRef {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<RealmRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction: Option<TypedName>,
}

/// Read-only profile snapshot as returned by the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub id: u64,
    pub name: String,
    pub realm: RealmRef,
    pub level: u32,
    pub character_class: NamedRef,
    pub race: NamedRef,
    pub faction: TypedName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<TypedName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_spec: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild: Option<GuildRef>,
    #[serde(default)]
    pub achievement_points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_item_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipped_item_level: Option<u32>,
    /// Milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_timestamp: Option<i64>,
}

impl CharacterProfile {
    pub fn is_alliance(&self) -> bool {
        self.faction.kind.eq_ignore_ascii_case("ALLIANCE")
    }

    pub fn class_color(&self) -> &'static str {
        class_color(&self.character_class.name)
    }

    pub fn faction_color(&self) -> &'static str {
        if self.is_alliance() {
            "#0078FF"
        } else {
            "#DC143C"
        }
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login_timestamp
            .and_then(DateTime::from_timestamp_millis)
    }

    /// "Last seen" text, e.g. "2 days ago".
    pub fn last_seen(&self, now: DateTime<Utc>) -> Option<String> {
        self.last_login().map(|then| format_relative_time(then, now))
    }
}

/// Class color as a hex string; unknown classes render white.
pub fn class_color(class_name: &str) -> &'static str {
    match class_name {
        "Death Knight" => "#C41E3A",
        "Demon Hunter" => "#A330C9",
        "Druid" => "#FF7C0A",
        "Evoker" => "#33937F",
        "Hunter" => "#AAD372",
        "Mage" => "#3FC7EB",
        "Monk" => "#00FF98",
        "Paladin" => "#F48CBA",
        "Priest" => "#FFFFFF",
        "Rogue" => "#FFF468",
        "Shaman" => "#0070DD",
        "Warlock" => "#8788EE",
        "Warrior" => "#C69B6D",
        _ => "#FFFFFF",
    }
}
