// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: pure data types and validation helpers shared by ingestion, query, and session logic.

pub mod asset;
pub mod draft;
pub mod kit;
pub mod tags;

pub use asset::{
    ApprovalStatus, Asset, AssetExtras, AssetKind, Category, Confidentiality, FixedValue,
};
pub use draft::{AssetDraft, DraftError};
pub use kit::{Kit, KitError};
pub use tags::Tags;
