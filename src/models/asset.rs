// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Canonical asset record and its fixed enumerations (UI-agnostic).

use serde::Serialize;
use time::OffsetDateTime;

use crate::models::tags::Tags;

/// Enumerations with a closed set of canonical tokens.
///
/// `from_token` is exact and used where invalid input must be rejected (query
/// construction). `from_lenient` is case-insensitive and falls back to the
/// documented default; ingestion uses it so a stray value never drops a record.
pub trait FixedValue: Copy + Eq + Default + Sized + 'static {
    /// Human-readable field name used in error messages.
    const FIELD: &'static str;

    /// Every allowed value in menu order.
    fn all() -> &'static [Self];

    /// Canonical token.
    fn as_str(&self) -> &'static str;

    /// Exact, case-sensitive lookup of a canonical token.
    fn from_token(raw: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.as_str() == raw)
    }

    /// Case-insensitive lookup that falls back to `Self::default()`.
    fn from_lenient(raw: &str) -> Self {
        let raw = raw.trim();
        Self::all()
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(raw))
            .unwrap_or_default()
    }
}

/// Access-sensitivity tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidentiality {
    Public,
    #[default]
    Internal,
    Confidential,
}

impl FixedValue for Confidentiality {
    const FIELD: &'static str = "confidentiality";

    fn all() -> &'static [Self] {
        &[Self::Public, Self::Internal, Self::Confidential]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Confidential => "confidential",
        }
    }
}

/// Approval workflow state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl FixedValue for ApprovalStatus {
    const FIELD: &'static str = "approval status";

    fn all() -> &'static [Self] {
        &[Self::Pending, Self::Approved, Self::Rejected]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Library category shown in the dashboard's category menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Category {
    Brand,
    Photo,
    Video,
    #[default]
    Document,
    Graphics,
}

impl FixedValue for Category {
    const FIELD: &'static str = "category";

    fn all() -> &'static [Self] {
        &[
            Self::Brand,
            Self::Photo,
            Self::Video,
            Self::Document,
            Self::Graphics,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Brand => "Brand",
            Self::Photo => "Photo",
            Self::Video => "Video",
            Self::Document => "Document",
            Self::Graphics => "Graphics",
        }
    }
}

/// Coarse media kind derived from a type tag or MIME type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
    Pdf,
    Document,
    #[default]
    Other,
}

impl FixedValue for AssetKind {
    const FIELD: &'static str = "asset kind";

    fn all() -> &'static [Self] {
        &[
            Self::Image,
            Self::Video,
            Self::Pdf,
            Self::Document,
            Self::Other,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Pdf => "pdf",
            Self::Document => "document",
            Self::Other => "other",
        }
    }
}

/// One managed file reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub external_link: String,
    pub kind: AssetKind,
    pub confidentiality: Confidentiality,
    pub category: Category,
    pub tags: Tags,
    #[serde(with = "time::serde::rfc3339")]
    pub date_added: OffsetDateTime,
    pub approval_status: ApprovalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub file_size: u64,
    pub download_count: u64,
    #[serde(flatten)]
    pub extras: AssetExtras,
}

/// Optional fields carried over from the richer record shapes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetExtras {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub date_modified: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_notes: Option<String>,
}

impl Asset {
    /// Minimal constructor; every other field takes its documented default.
    pub fn new(id: impl Into<String>, name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            external_link: link.into(),
            kind: AssetKind::default(),
            confidentiality: Confidentiality::default(),
            category: Category::default(),
            tags: Tags::default(),
            date_added: OffsetDateTime::UNIX_EPOCH,
            approval_status: ApprovalStatus::default(),
            description: None,
            file_size: 0,
            download_count: 0,
            extras: AssetExtras::default(),
        }
    }
}
