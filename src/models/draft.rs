// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Editable asset fields captured by the add/edit form, plus validation.

use thiserror::Error;
use url::Url;

use crate::models::{ApprovalStatus, Asset, AssetKind, Category, Confidentiality, Tags};
use crate::utils::infer_kind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Asset name cannot be empty.")]
    EmptyName,
    #[error("Link must be a valid http/https URL: {0}")]
    InvalidLink(String),
    #[error("Unknown asset id: {0}")]
    UnknownId(String),
}

/// User-editable subset of [`Asset`].
///
/// A `kind` of `None` keeps the asset's kind, or re-infers it when the link changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetDraft {
    pub name: String,
    pub external_link: String,
    pub kind: Option<AssetKind>,
    pub confidentiality: Confidentiality,
    pub category: Category,
    pub approval_status: ApprovalStatus,
    pub tags: Tags,
    pub description: Option<String>,
    pub file_size: u64,
}

impl AssetDraft {
    /// Pre-fill a draft from an existing asset for editing.
    pub fn from_asset(asset: &Asset) -> Self {
        Self {
            name: asset.name.clone(),
            external_link: asset.external_link.clone(),
            kind: None,
            confidentiality: asset.confidentiality,
            category: asset.category,
            approval_status: asset.approval_status,
            tags: asset.tags.clone(),
            description: asset.description.clone(),
            file_size: asset.file_size,
        }
    }

    /// Check required fields.
    ///
    /// - `name` must be non-empty after trimming.
    /// - `external_link` must be an `http`/`https` URL with a host.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::EmptyName);
        }

        let link = self.external_link.trim();
        Url::parse(link)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
            .map(|_| ())
            .ok_or_else(|| DraftError::InvalidLink(link.to_string()))
    }

    /// Copy the editable fields onto `asset`. Identity and counters are left alone.
    pub fn apply_to(&self, asset: &mut Asset) {
        let link = self.external_link.trim().to_string();
        if asset.external_link != link {
            // The old MIME type describes the old file.
            let (inferred, mime) = infer_kind(None, &link);
            asset.kind = self.kind.unwrap_or(inferred);
            asset.extras.mime_type = mime;
        } else if let Some(kind) = self.kind {
            asset.kind = kind;
        }

        asset.name = self.name.trim().to_string();
        asset.external_link = link;
        asset.confidentiality = self.confidentiality;
        asset.category = self.category;
        asset.approval_status = self.approval_status;
        asset.tags = self.tags.clone();
        asset.description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        asset.file_size = self.file_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, link: &str) -> AssetDraft {
        AssetDraft {
            name: name.into(),
            external_link: link.into(),
            ..Default::default()
        }
    }

    #[test]
    fn validate_rejects_blank_name() {
        assert_eq!(
            draft("  ", "https://example.com/a.png").validate(),
            Err(DraftError::EmptyName)
        );
    }

    #[test]
    fn validate_rejects_non_http_links() {
        assert!(matches!(
            draft("Logo", "htp://example").validate(),
            Err(DraftError::InvalidLink(_))
        ));
        assert!(matches!(
            draft("Logo", "ftp://example.com/a.png").validate(),
            Err(DraftError::InvalidLink(_))
        ));
        assert!(draft("Logo", "https://www.dropbox.com/s/abc?dl=0").validate().is_ok());
    }

    #[test]
    fn apply_to_infers_kind_and_drops_blank_description() {
        let mut asset = Asset::new("7", "old", "https://example.com/old.txt");
        let mut d = draft(" Brochure ", "https://example.com/brochure.pdf");
        d.description = Some("   ".into());

        d.apply_to(&mut asset);

        assert_eq!(asset.id, "7");
        assert_eq!(asset.name, "Brochure");
        assert_eq!(asset.kind, AssetKind::Pdf);
        assert_eq!(asset.extras.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(asset.description, None);
    }

    #[test]
    fn edit_draft_keeps_kind_until_link_changes() {
        let mut asset = Asset::new("3", "Brochure", "https://example.com/brochure.pdf");
        draft("x", "https://example.com/x.pdf").apply_to(&mut asset);
        assert_eq!(asset.kind, AssetKind::Pdf);

        let mut d = AssetDraft::from_asset(&asset);
        d.name = "Renamed".into();
        d.apply_to(&mut asset);
        assert_eq!(asset.kind, AssetKind::Pdf);
        assert_eq!(asset.extras.mime_type.as_deref(), Some("application/pdf"));

        d.external_link = "https://example.com/tour.mp4".into();
        d.apply_to(&mut asset);
        assert_eq!(asset.kind, AssetKind::Video);
        assert_eq!(asset.extras.mime_type.as_deref(), Some("video/mp4"));

        d.external_link = "https://example.com/share/abc".into();
        d.apply_to(&mut asset);
        assert_eq!(asset.kind, AssetKind::Other);
        assert_eq!(asset.extras.mime_type, None);
    }
}
