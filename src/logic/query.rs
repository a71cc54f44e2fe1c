// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Asset query engine: multi-predicate filtering and stable sorting.
//!
//! Everything here is pure. [`Query::apply`] borrows the source collection and
//! returns a new ordered view; the source is never touched. Invalid filter or
//! sort values cannot be represented by the typed API, and the string-facing
//! constructors reject them with a [`QueryError`].

use std::cmp::Ordering;

use thiserror::Error;
use time::OffsetDateTime;

use crate::models::{ApprovalStatus, Asset, Category, Confidentiality, FixedValue};

/// Token standing for "match all" in string-facing filter parameters.
pub const MATCH_ALL: &str = "all";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unknown {field} filter value {value:?}; expected \"all\" or one of: {allowed}")]
    UnknownFilterValue {
        field: &'static str,
        value: String,
        allowed: String,
    },
    #[error("Unknown sort field {0:?}; expected one of: name, dateAdded, downloadCount, fileSize")]
    UnknownSortField(String),
    #[error("Unknown sort direction {0:?}; expected \"asc\" or \"desc\"")]
    UnknownSortDirection(String),
}

/// Categorical filter: either everything passes, or only one exact value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: FixedValue> Filter<T> {
    /// Parse a filter parameter. Values are matched exactly against canonical tokens.
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        if raw == MATCH_ALL {
            return Ok(Self::All);
        }
        T::from_token(raw)
            .map(Self::Only)
            .ok_or_else(|| QueryError::UnknownFilterValue {
                field: T::FIELD,
                value: raw.to_string(),
                allowed: T::all()
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => MATCH_ALL,
            Self::Only(v) => v.as_str(),
        }
    }
}

/// Fields offered by the sort menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    DateAdded,
    DownloadCount,
    FileSize,
}

impl SortField {
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        match raw {
            "name" => Ok(Self::Name),
            "dateAdded" => Ok(Self::DateAdded),
            "downloadCount" => Ok(Self::DownloadCount),
            "fileSize" => Ok(Self::FileSize),
            other => Err(QueryError::UnknownSortField(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DateAdded => "dateAdded",
            Self::DownloadCount => "downloadCount",
            Self::FileSize => "fileSize",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        match raw {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(QueryError::UnknownSortDirection(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Apply the direction to an ascending comparison. `Equal` stays `Equal`.
    fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// A `(field, direction)` pair from the sort menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SortOption {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOption {
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn parse(field: &str, direction: &str) -> Result<Self, QueryError> {
        Ok(Self::new(
            SortField::parse(field)?,
            SortDirection::parse(direction)?,
        ))
    }

    /// Menu presets in display order; the first is the default.
    pub fn presets() -> [(&'static str, SortOption); 6] {
        use SortDirection::*;
        use SortField::*;
        [
            ("Name A-Z", Self::new(Name, Asc)),
            ("Name Z-A", Self::new(Name, Desc)),
            ("Date Added (Newest)", Self::new(DateAdded, Desc)),
            ("Date Added (Oldest)", Self::new(DateAdded, Asc)),
            ("Most Downloaded", Self::new(DownloadCount, Desc)),
            ("Largest First", Self::new(FileSize, Desc)),
        ]
    }

    /// Menu label for this option, if it is one of the presets.
    pub fn label(&self) -> Option<&'static str> {
        Self::presets()
            .into_iter()
            .find(|(_, opt)| opt == self)
            .map(|(label, _)| label)
    }
}

/// Transient view query: free-text search, categorical filters, and sort.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Query {
    pub search: String,
    pub category: Filter<Category>,
    pub confidentiality: Filter<Confidentiality>,
    pub status: Filter<ApprovalStatus>,
    pub sort: SortOption,
}

/// Raw string parameters as they arrive from a CLI, config, or form.
#[derive(Clone, Debug, Default)]
pub struct QueryParams<'a> {
    pub search: Option<&'a str>,
    pub category: Option<&'a str>,
    pub confidentiality: Option<&'a str>,
    pub status: Option<&'a str>,
    pub sort_field: Option<&'a str>,
    pub sort_direction: Option<&'a str>,
}

impl Query {
    /// Build a query from string parameters, failing on the first invalid value.
    /// Missing parameters keep their defaults.
    pub fn from_params(params: &QueryParams<'_>) -> Result<Self, QueryError> {
        let defaults = SortOption::default();
        let field = match params.sort_field {
            Some(raw) => SortField::parse(raw)?,
            None => defaults.field,
        };
        let direction = match params.sort_direction {
            Some(raw) => SortDirection::parse(raw)?,
            None => defaults.direction,
        };

        Ok(Self {
            search: params.search.unwrap_or_default().to_string(),
            category: params.category.map(Filter::parse).transpose()?.unwrap_or_default(),
            confidentiality: params
                .confidentiality
                .map(Filter::parse)
                .transpose()?
                .unwrap_or_default(),
            status: params.status.map(Filter::parse).transpose()?.unwrap_or_default(),
            sort: SortOption::new(field, direction),
        })
    }

    /// True when `asset` passes every predicate.
    pub fn matches(&self, asset: &Asset) -> bool {
        self.matches_search(asset)
            && self.category.matches(&asset.category)
            && self.confidentiality.matches(&asset.confidentiality)
            && self.status.matches(&asset.approval_status)
    }

    fn matches_search(&self, asset: &Asset) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();

        asset.name.to_lowercase().contains(&needle)
            || asset
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
            || asset.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }

    /// Keep matching assets in their original relative order.
    pub fn filter<'a>(&self, assets: &'a [Asset]) -> Vec<&'a Asset> {
        assets.iter().filter(|a| self.matches(a)).collect()
    }

    /// Filter then sort: the view the dashboard renders.
    pub fn apply<'a>(&self, assets: &'a [Asset]) -> Vec<&'a Asset> {
        sort_view(self.filter(assets), self.sort)
    }
}

/// Precomputed comparison key for one asset under one sort field.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    /// Collation key first, raw text breaks the remaining ties.
    Text(String, String),
    Number(u64),
    Instant(OffsetDateTime),
}

impl SortKey {
    fn of(asset: &Asset, field: SortField) -> Self {
        match field {
            SortField::Name => Self::Text(collation_key(&asset.name), asset.name.clone()),
            SortField::DateAdded => Self::Instant(asset.date_added),
            SortField::DownloadCount => Self::Number(asset.download_count),
            SortField::FileSize => Self::Number(asset.file_size),
        }
    }
}

/// Locale-friendly collation key: transliterated to ASCII and case-folded so
/// "Émile" sorts with "emile" rather than after "z".
fn collation_key(value: &str) -> String {
    deunicode::deunicode(value).to_lowercase()
}

/// Stable sort of a view. Equal keys keep their input order in both directions.
pub fn sort_view(view: Vec<&Asset>, sort: SortOption) -> Vec<&Asset> {
    let mut keyed: Vec<(SortKey, &Asset)> = view
        .into_iter()
        .map(|a| (SortKey::of(a, sort.field), a))
        .collect();
    // `sort_by` is stable; `orient` only flips non-equal results.
    keyed.sort_by(|(a, _), (b, _)| sort.direction.orient(a.cmp(b)));
    keyed.into_iter().map(|(_, a)| a).collect()
}
