// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Offline asset sources: the bundled sample library and JSON files on disk.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;

use super::AssetSource;
use super::ingest::parse_json_array;

const SAMPLE_ASSETS: &str = include_str!("sample_assets.json");

/// The eight-asset sample library shipped with the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSource;

impl AssetSource for BuiltinSource {
    fn describe(&self) -> String {
        "built-in sample library".into()
    }

    fn fetch(&self) -> Result<Vec<Value>> {
        parse_json_array(SAMPLE_ASSETS).context("Bundled sample library is corrupt")
    }
}

/// A JSON array of asset records read from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AssetSource for FileSource {
    fn describe(&self) -> String {
        format!("fixture file {}", self.path.display())
    }

    fn fetch(&self) -> Result<Vec<Value>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        parse_json_array(&text).with_context(|| format!("Failed to parse {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::provider::ingest::ingest_records;

    #[test]
    fn builtin_library_ingests_cleanly() {
        let report = ingest_records(BuiltinSource.fetch().unwrap());
        assert_eq!(report.assets.len(), 8);
        assert!(report.rejected.is_empty());
        assert_eq!(report.assets[0].name, "FABRICATE Primary Logo");
    }

    #[test]
    fn file_source_reads_json_array() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "a", "name": "Alpha", "link": "https://example.com/a.png"}}]"#
        )
        .unwrap();

        let records = FileSource::new(file.path()).fetch().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], "Alpha");
    }

    #[test]
    fn file_source_reports_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = FileSource::new(dir.path().join("missing.json"));
        let err = missing.fetch().unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ not json").unwrap();
        let err = FileSource::new(&bad).fetch().unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse"));
    }
}
