// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Turn provider JSON into canonical assets.
//! Parsing is kept pure so fixtures, files, and REST payloads share one path.
//!
//! Two record shapes are understood: the flat dashboard/plugin shape
//! (`name`, `link`, `type`, ...) and the blog-engine post shape
//! (`title.rendered`, `content.rendered`, `acf.{...}`). A malformed record is
//! rejected on its own; the rest of the collection is kept.

use std::collections::HashSet;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, warn};
use url::Url;

use crate::models::{
    ApprovalStatus, Asset, AssetExtras, Category, Confidentiality, FixedValue, Tags,
};
use crate::utils::{infer_kind, parse_timestamp};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("record is malformed: {0}")]
    Malformed(String),
    #[error("record has no id")]
    MissingId,
    #[error("asset {id} has no external link")]
    MissingLink { id: String },
    #[error("asset {id} has an invalid external link {link:?}")]
    InvalidLink { id: String, link: String },
    #[error("duplicate asset id {0}")]
    DuplicateId(String),
}

/// A record skipped during ingestion, with its position in the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub index: usize,
    pub id: Option<String>,
    pub error: IngestError,
}

/// Result of ingesting one payload.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub assets: Vec<Asset>,
    pub rejected: Vec<RejectedRecord>,
}

/// Parse a payload that must be a JSON array of records.
pub fn parse_json_array(json: &str) -> Result<Vec<Value>> {
    serde_json::from_str::<Vec<Value>>(json).context("Asset payload must be a JSON array")
}

/// Ingest every record, keeping order and rejecting bad or duplicate records individually.
pub fn ingest_records(records: Vec<Value>) -> IngestReport {
    let mut report = IngestReport::default();
    let mut seen = HashSet::new();

    for (index, value) in records.into_iter().enumerate() {
        let raw_id = value.get("id").and_then(|v| value_to_string(Some(v)));
        let outcome = ingest_record(value).and_then(|asset| {
            if seen.insert(asset.id.clone()) {
                Ok(asset)
            } else {
                Err(IngestError::DuplicateId(asset.id))
            }
        });

        match outcome {
            Ok(asset) => report.assets.push(asset),
            Err(error) => {
                warn!(index, id = ?raw_id, %error, "rejected asset record");
                report.rejected.push(RejectedRecord {
                    index,
                    id: raw_id.filter(|id| !id.trim().is_empty()),
                    error,
                });
            }
        }
    }

    debug!(
        accepted = report.assets.len(),
        rejected = report.rejected.len(),
        "ingested asset payload"
    );
    report
}

/// Ingest a single record of either supported shape.
pub fn ingest_record(value: Value) -> Result<Asset, IngestError> {
    if !value.is_object() {
        return Err(IngestError::NotAnObject);
    }

    let raw = if is_post_shape(&value) {
        serde_json::from_value::<PostRaw>(value)
            .map_err(|e| IngestError::Malformed(e.to_string()))?
            .into_flat()
    } else {
        serde_json::from_value::<RawAsset>(value)
            .map_err(|e| IngestError::Malformed(e.to_string()))?
    };

    raw.into_asset()
}

fn is_post_shape(value: &Value) -> bool {
    value.get("title").is_some_and(Value::is_object) || value.get("acf").is_some_and(Value::is_object)
}

/// Flat record shape used by fixtures and the CMS plugin endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAsset {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    external_link: Option<Value>,
    #[serde(default)]
    link: Option<Value>,
    #[serde(default)]
    dropbox_url: Option<Value>,
    #[serde(default, rename = "file_url")]
    file_url: Option<Value>,
    #[serde(default, rename = "type")]
    type_tag: Option<Value>,
    #[serde(default)]
    mime_type: Option<Value>,
    #[serde(default, rename = "asset_type")]
    asset_type: Option<Value>,
    #[serde(default)]
    category: Option<Value>,
    #[serde(default)]
    confidentiality: Option<Value>,
    #[serde(default)]
    tags: Option<Value>,
    #[serde(default)]
    date_added: Option<Value>,
    #[serde(default)]
    date_modified: Option<Value>,
    #[serde(default)]
    approval_status: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    file_size: Option<Value>,
    #[serde(default)]
    download_count: Option<Value>,
    #[serde(default)]
    thumbnail: Option<Value>,
    #[serde(default)]
    thumbnail_url: Option<Value>,
    #[serde(default)]
    created_by: Option<Value>,
    #[serde(default)]
    project: Option<Value>,
    #[serde(default)]
    collection: Option<Value>,
    #[serde(default)]
    usage_notes: Option<Value>,
}

/// Blog-engine post shape (`/wp/v2/posts`).
#[derive(Debug, Deserialize)]
struct PostRaw {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    title: Option<Rendered>,
    #[serde(default)]
    content: Option<Rendered>,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    modified: Option<Value>,
    #[serde(default)]
    acf: Option<AcfBlock>,
}

#[derive(Debug, Deserialize, Default)]
struct Rendered {
    #[serde(default)]
    rendered: String,
}

#[derive(Debug, Deserialize, Default)]
struct AcfBlock {
    #[serde(default)]
    asset_type: Option<Value>,
    #[serde(default)]
    confidentiality: Option<Value>,
    #[serde(default)]
    file_url: Option<Value>,
    #[serde(default)]
    thumbnail_url: Option<Value>,
    #[serde(default)]
    file_size: Option<Value>,
    #[serde(default)]
    tags: Option<Value>,
    #[serde(default)]
    approval_status: Option<Value>,
    #[serde(default)]
    download_count: Option<Value>,
}

impl PostRaw {
    /// Map post fields onto the flat shape; HTML in title and content is stripped.
    fn into_flat(self) -> RawAsset {
        let acf = self.acf.unwrap_or_default();
        RawAsset {
            id: self.id,
            name: self.title.map(|t| Value::String(strip_html(&t.rendered))),
            file_url: acf.file_url,
            asset_type: acf.asset_type,
            confidentiality: acf.confidentiality,
            tags: acf.tags,
            date_added: self.date,
            date_modified: self.modified,
            approval_status: acf.approval_status,
            description: self
                .content
                .map(|c| Value::String(strip_html(&c.rendered))),
            file_size: acf.file_size,
            download_count: acf.download_count,
            thumbnail_url: acf.thumbnail_url,
            ..Default::default()
        }
    }
}

impl RawAsset {
    fn into_asset(self) -> Result<Asset, IngestError> {
        let id = non_empty(self.id.as_ref()).ok_or(IngestError::MissingId)?;

        let link = [&self.external_link, &self.link, &self.dropbox_url, &self.file_url]
            .into_iter()
            .find_map(|v| non_empty(v.as_ref()))
            .ok_or_else(|| IngestError::MissingLink { id: id.clone() })?;
        if Url::parse(&link).is_err() {
            return Err(IngestError::InvalidLink { id, link });
        }

        let type_tag =
            non_empty(self.type_tag.as_ref()).or_else(|| non_empty(self.asset_type.as_ref()));
        let mime_tag = non_empty(self.mime_type.as_ref());
        let (kind, mime) = infer_kind(mime_tag.as_deref().or(type_tag.as_deref()), &link);

        // The plugin shape carries the category in its type tag.
        let category = non_empty(self.category.as_ref())
            .or_else(|| type_tag.clone())
            .map(|c| Category::from_lenient(&c))
            .unwrap_or_default();

        let date_added = match non_empty(self.date_added.as_ref()) {
            Some(raw) => parse_timestamp(&raw).unwrap_or_else(|| {
                warn!(%id, date = %raw, "unparseable dateAdded; using epoch");
                OffsetDateTime::UNIX_EPOCH
            }),
            None => OffsetDateTime::UNIX_EPOCH,
        };

        Ok(Asset {
            name: non_empty(self.name.as_ref()).unwrap_or_default(),
            kind,
            confidentiality: non_empty(self.confidentiality.as_ref())
                .map(|c| Confidentiality::from_lenient(&c))
                .unwrap_or_default(),
            category,
            tags: value_to_tags(self.tags.as_ref()),
            date_added,
            approval_status: non_empty(self.approval_status.as_ref())
                .map(|s| ApprovalStatus::from_lenient(&s))
                .unwrap_or_default(),
            description: non_empty(self.description.as_ref()),
            file_size: value_to_u64(self.file_size.as_ref()),
            download_count: value_to_u64(self.download_count.as_ref()),
            extras: AssetExtras {
                mime_type: mime,
                thumbnail_url: non_empty(self.thumbnail_url.as_ref())
                    .or_else(|| non_empty(self.thumbnail.as_ref())),
                date_modified: non_empty(self.date_modified.as_ref())
                    .and_then(|d| parse_timestamp(&d)),
                created_by: non_empty(self.created_by.as_ref()),
                project: non_empty(self.project.as_ref()),
                collection: non_empty(self.collection.as_ref()),
                usage_notes: non_empty(self.usage_notes.as_ref()),
            },
            id,
            external_link: link,
        })
    }
}

/// Convert a JSON `Value` reference into an optional `String` representation.
///
/// - Returns `None` for `None` and `Value::Null`.
/// - For `Value::String`, returns a cloned string.
/// - For `Value::Number` and `Value::Bool`, returns the literal text.
/// - Arrays and objects have no scalar text and yield `None`.
fn value_to_string(val: Option<&Value>) -> Option<String> {
    match val? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Trimmed scalar text, or `None` when blank.
fn non_empty(val: Option<&Value>) -> Option<String> {
    value_to_string(val)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Accept non-negative integers given as numbers or numeric strings; anything else is 0.
fn value_to_u64(val: Option<&Value>) -> u64 {
    match val {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}

/// Tags may arrive as an array of scalars or a comma-separated string.
fn value_to_tags(val: Option<&Value>) -> Tags {
    match val {
        Some(Value::Array(items)) => {
            Tags::new(items.iter().filter_map(|v| value_to_string(Some(v))).collect())
        }
        Some(Value::String(s)) => Tags::parse_list(s),
        _ => Tags::default(),
    }
}

/// Strip markup from rendered CMS HTML and decode the basic entities left behind.
fn strip_html(html: &str) -> String {
    let text = ammonia::Builder::empty().clean(html).to_string();
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}
