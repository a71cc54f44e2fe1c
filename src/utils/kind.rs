// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges
//! Media kind mapping based on type tags, MIME types, and link paths.
//!
//! Records arrive with anything from a bare tag (`"image"`) to a full MIME
//! type (`"application/vnd.ms-powerpoint"`) or nothing at all. MIME matches
//! win; a missing type falls back to the extension of the link's path.

use url::Url;

use crate::models::AssetKind;

/// Resolve the kind for a record, returning the MIME type when one is known.
pub fn infer_kind(type_tag: Option<&str>, link: &str) -> (AssetKind, Option<String>) {
    let tag = type_tag.map(str::trim).filter(|t| !t.is_empty());

    if let Some(tag) = tag {
        if tag.contains('/') {
            let mime = tag.to_ascii_lowercase();
            return (classify_mime(&mime), Some(mime));
        }
        if let Some(kind) = kind_from_tag(tag) {
            return (kind, None);
        }
    }

    match guess_mime(link) {
        Some(mime) => (classify_mime(&mime), Some(mime)),
        None => (AssetKind::Other, None),
    }
}

/// Map a bare type tag (as used by the upload form) to a kind.
fn kind_from_tag(tag: &str) -> Option<AssetKind> {
    match tag.to_ascii_lowercase().as_str() {
        "image" | "psd" | "photo" | "graphics" => Some(AssetKind::Image),
        "video" => Some(AssetKind::Video),
        "pdf" => Some(AssetKind::Pdf),
        "document" => Some(AssetKind::Document),
        "other" => Some(AssetKind::Other),
        _ => None,
    }
}

/// Classify a MIME type into a coarse kind.
pub fn classify_mime(mime: &str) -> AssetKind {
    let mime = mime
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    if mime.starts_with("image/") {
        return AssetKind::Image;
    }
    if mime.starts_with("video/") {
        return AssetKind::Video;
    }
    if mime == "application/pdf" {
        return AssetKind::Pdf;
    }
    if is_document_mime(&mime) {
        return AssetKind::Document;
    }

    AssetKind::Other
}

fn is_document_mime(mime: &str) -> bool {
    mime.starts_with("text/")
        || mime == "application/msword"
        || mime == "application/rtf"
        || mime == "application/vnd.ms-excel"
        || mime == "application/vnd.ms-powerpoint"
        || mime.starts_with("application/vnd.openxmlformats-officedocument.")
        || mime.starts_with("application/vnd.oasis.opendocument.")
}

/// Guess a MIME type from the path component of a link.
pub fn guess_mime(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    let last = url.path_segments()?.next_back()?;
    if !last.contains('.') {
        return None;
    }
    mime_guess::from_path(last)
        .first()
        .map(|m| m.essence_str().to_string())
}
