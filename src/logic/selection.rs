// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Multi-select state layered over whatever view is currently displayed.
//!
//! Selections outlive filter changes: an id selected under one filter stays
//! selected (and counted) while hidden. "Select all" only ever inspects and
//! touches the ids of the view it is given.

use std::collections::HashMap;

use crate::models::Asset;

/// Asset id to "selected" flag. Missing ids are unselected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    flags: HashMap<String, bool>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set membership for exactly one id.
    pub fn select(&mut self, id: &str, selected: bool) {
        self.flags.insert(id.to_string(), selected);
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    /// True when every asset of `view` is selected (vacuously true for an empty view).
    pub fn all_selected(&self, view: &[&Asset]) -> bool {
        view.iter().all(|a| self.is_selected(&a.id))
    }

    /// Toggle the whole view: deselect it when fully selected, otherwise select every id in it.
    pub fn select_all(&mut self, view: &[&Asset]) {
        let select = !self.all_selected(view);
        for asset in view {
            if select {
                self.flags.insert(asset.id.clone(), true);
            } else {
                self.flags.remove(&asset.id);
            }
        }
    }

    /// Number of selected ids across the whole set, visible or not.
    pub fn count(&self) -> usize {
        self.flags.values().filter(|selected| **selected).count()
    }

    /// Selected ids that are present in `view`, in view order.
    pub fn selected_in(&self, view: &[&Asset]) -> Vec<String> {
        view.iter()
            .filter(|a| self.is_selected(&a.id))
            .map(|a| a.id.clone())
            .collect()
    }

    /// Hand the selected-and-visible ids to a bulk action, then reset the whole set.
    pub fn consume(&mut self, view: &[&Asset]) -> Vec<String> {
        let ids = self.selected_in(view);
        self.clear();
        ids
    }

    pub fn clear(&mut self) {
        self.flags.clear();
    }
}
