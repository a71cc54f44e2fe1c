// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Asset providers: where a session's collection is seeded from.

pub mod fixture;
pub mod ingest;
pub mod rest;

use std::path::PathBuf;

use anyhow::Result;
use serde_json::Value;
use tracing::info;

pub use fixture::{BuiltinSource, FileSource};
pub use ingest::{IngestError, IngestReport, RejectedRecord, ingest_record, ingest_records};
pub use rest::{RestConfig, RestSource};

/// Something that can produce raw asset records.
pub trait AssetSource {
    /// Human-readable label for status messages.
    fn describe(&self) -> String;
    /// Fetch the raw JSON records, one value per asset.
    fn fetch(&self) -> Result<Vec<Value>>;
}

/// Choice of source, carried by fetch commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SourceConfig {
    #[default]
    Builtin,
    File(PathBuf),
    Rest(RestConfig),
}

impl SourceConfig {
    pub fn open(&self) -> Box<dyn AssetSource + Send> {
        match self {
            SourceConfig::Builtin => Box::new(BuiltinSource),
            SourceConfig::File(path) => Box::new(FileSource::new(path.clone())),
            SourceConfig::Rest(cfg) => Box::new(RestSource::new(cfg.clone())),
        }
    }
}

/// Fetch and ingest from the configured source.
pub fn load(source: &SourceConfig) -> Result<IngestReport> {
    let source = source.open();
    let records = source.fetch()?;
    let report = ingest_records(records);
    info!(
        source = %source.describe(),
        assets = report.assets.len(),
        rejected = report.rejected.len(),
        "loaded assets"
    );
    Ok(report)
}
