// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Aggregated character lookup result.

use super::{CharacterEquipment, CharacterIdentity, CharacterProfile, MediaAssets, PvpSummary};
use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Everything the profile page needs, fetched in one go.
///
/// Fields that failed to load are `None` and `error` holds the first
/// failure (checked in the order profile, pvp, media, equipment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedCharacterResult {
    pub identity: CharacterIdentity,
    pub profile: Option<CharacterProfile>,
    pub pvp: Option<PvpSummary>,
    pub media: Option<MediaAssets>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<CharacterEquipment>,
    pub error: Option<String>,
}

impl AggregatedCharacterResult {
    /// Fold the sub-fetch outcomes into one result.
    pub fn fold(
        identity: CharacterIdentity,
        profile: Result<CharacterProfile, ApiError>,
        pvp: Result<PvpSummary, ApiError>,
        media: Result<MediaAssets, ApiError>,
        equipment: Result<CharacterEquipment, ApiError>,
    ) -> Self {
        let mut error = None;
        let profile = take("profile", profile, &identity, &mut error);
        let pvp = take("pvp", pvp, &identity, &mut error);
        let media = take("media", media, &identity, &mut error);
        let equipment = take("equipment", equipment, &identity, &mut error);

        Self {
            identity,
            profile,
            pvp,
            media,
            equipment,
            error,
        }
    }

    /// Whether this result belongs to `identity`; late results for an old
    /// search should be dropped by the consumer.
    pub fn is_for(&self, identity: &CharacterIdentity) -> bool {
        &self.identity == identity
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

fn take<T>(
    part: &'static str,
    outcome: Result<T, ApiError>,
    identity: &CharacterIdentity,
    first_error: &mut Option<String>,
) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(character = %identity, part, error = %e, "Character lookup part failed");
            if first_error.is_none() {
                *first_error = Some(e.to_string());
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;

    fn identity() -> CharacterIdentity {
        CharacterIdentity::new("Thrall", "Stormrage", Region::Us).unwrap()
    }

    #[test]
    fn test_fold_keeps_successes_and_first_error() {
        let result = AggregatedCharacterResult::fold(
            identity(),
            Err(ApiError::api(500, "Internal Server Error")),
            Ok(PvpSummary::default()),
            Err(ApiError::network("timed out")),
            Ok(CharacterEquipment::default()),
        );

        assert!(result.profile.is_none());
        assert!(result.pvp.is_some());
        assert!(result.media.is_none());
        assert!(result.equipment.is_some());
        assert_eq!(
            result.error.as_deref(),
            Some("API_ERROR (500): Internal Server Error")
        );
        assert!(!result.is_complete());
    }

    #[test]
    fn test_is_for_identity() {
        let result = AggregatedCharacterResult::fold(
            identity(),
            Err(ApiError::api(404, "Not Found")),
            Ok(PvpSummary::default()),
            Ok(MediaAssets::default()),
            Ok(CharacterEquipment::default()),
        );
        assert!(result.is_for(&identity()));
        let other = CharacterIdentity::new("Jaina", "Proudmoore", Region::Us).unwrap();
        assert!(!result.is_for(&other));
    }
}
