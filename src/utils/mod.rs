// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by ingestion, session, and CLI code.

pub mod dates;
pub mod format;
pub mod kind;
pub mod links;
pub mod slug;

/// Parse record timestamps in the accepted shapes.
pub use dates::{format_date, parse_timestamp};
/// Human-readable byte sizes.
pub use format::format_bytes;
/// Resolve an asset kind from a type tag or link.
pub use kind::infer_kind;
/// Rewrite share links to direct-download links.
pub use links::direct_download_url;
/// Lowercase tag-safe slugs.
pub use slug::slugify;
