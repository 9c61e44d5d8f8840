// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Character media and equipment models.

use super::character::TypedName;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub key: String,
    pub value: String,
}

/// `character-media` resource: avatar, inset and full-body renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaAssets {
    #[serde(default)]
    pub assets: Vec<MediaAsset>,
}

impl MediaAssets {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.assets
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    pub fn avatar(&self) -> Option<&str> {
        self.get("avatar")
    }

    /// Largest available render: `main-raw`, then `main`, then whatever comes first.
    pub fn main_render(&self) -> Option<&str> {
        self.get("main-raw")
            .or_else(|| self.get("main"))
            .or_else(|| self.assets.first().map(|a| a.value.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemLevel {
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub slot: TypedName,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<TypedName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<ItemLevel>,
}

/// `equipment` resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterEquipment {
    #[serde(default)]
    pub equipped_items: Vec<EquippedItem>,
}

impl CharacterEquipment {
    pub fn item_in_slot(&self, slot: &str) -> Option<&EquippedItem> {
        self.equipped_items
            .iter()
            .find(|item| item.slot.kind.eq_ignore_ascii_case(slot))
    }
}
