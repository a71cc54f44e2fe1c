// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Produce tag slugs from user-provided names.

/// Produce a lowercase slug for use inside tags.
///
/// # Steps
/// - Transliterate Unicode to ASCII with `deunicode` (e.g., "Å" → "A").
/// - Lowercase.
/// - Replace each whitespace run with a single `-`, dropping leading and trailing whitespace.
///
/// Punctuation is kept, so "C++ Launch" and "C Launch" stay distinct.
pub fn slugify(value: &str) -> String {
    let transliterated = deunicode::deunicode(value).to_lowercase();
    transliterated
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
