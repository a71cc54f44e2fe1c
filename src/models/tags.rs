//! Tag set domain helper.

use serde::Serialize;

/// Asset tags, normalized so matching never sees blanks or case-duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tags {
    items: Vec<String>,
}

impl Tags {
    pub fn new(items: Vec<String>) -> Self {
        let mut tags = Self { items };
        tags.normalize();
        tags
    }

    /// Split comma-separated user input into tags.
    pub fn parse_list(input: &str) -> Self {
        Self::new(input.split(',').map(str::to_string).collect())
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.items.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Append a tag unless an equivalent one is already present.
    /// Returns `true` when the tag was added.
    pub fn push(&mut self, tag: &str) -> bool {
        let trimmed = tag.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return false;
        }
        self.items.push(trimmed.to_string());
        true
    }

    fn normalize(&mut self) {
        // Dedup case-insensitively while preserving original casing of first occurrence.
        let mut seen = Vec::<String>::new();
        self.items = std::mem::take(&mut self.items)
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .filter(|t| {
                let lower = t.to_ascii_lowercase();
                if seen.contains(&lower) {
                    false
                } else {
                    seen.push(lower);
                    true
                }
            })
            .collect();
    }
}
