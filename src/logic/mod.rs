// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic: the query engine, selection state, and the in-session collection.

pub mod collection;
pub mod query;
pub mod selection;

pub use collection::AssetCollection;
pub use query::{
    Filter, MATCH_ALL, Query, QueryError, QueryParams, SortDirection, SortField, SortOption,
};
pub use selection::SelectionSet;
