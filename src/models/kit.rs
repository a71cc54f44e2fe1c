// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Kits: named groupings of assets created from a bulk selection.

use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;

use crate::utils::slugify;

/// Prefix shared by every kit tag.
pub const KIT_TAG_PREFIX: &str = "kit:";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KitError {
    #[error("Kit name cannot be empty.")]
    EmptyName,
    #[error("Kit name {0:?} has no usable characters.")]
    UnusableName(String),
    #[error("No assets selected in the current view.")]
    NoAssets,
    #[error("A kit tagged {0} already exists.")]
    DuplicateTag(String),
}

/// A named, user-created grouping of asset ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kit {
    pub name: String,
    pub tag: String,
    pub asset_ids: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Kit {
    pub fn new(
        name: &str,
        asset_ids: Vec<String>,
        created_at: OffsetDateTime,
    ) -> Result<Self, KitError> {
        let tag = kit_tag(name)?;
        if asset_ids.is_empty() {
            return Err(KitError::NoAssets);
        }
        Ok(Self {
            name: name.trim().to_string(),
            tag,
            asset_ids,
            created_at,
        })
    }
}

/// Tag applied to each member asset, e.g. `kit:q3-launch`.
pub fn kit_tag(name: &str) -> Result<String, KitError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(KitError::EmptyName);
    }
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(KitError::UnusableName(name.to_string()));
    }
    Ok(format!("{KIT_TAG_PREFIX}{slug}"))
}
