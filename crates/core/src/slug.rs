//! Title to slug derivation for direct storage inserts.
//!
//! Rows inserted straight into the posts table must carry the same `post_name`
//! the remote system would have derived, otherwise they are distinguishable from
//! API-created rows.
//!
//! Maintenance risk: this duplicates the remote system's derivation and nothing
//! reconciles the two. If the live system changes how it builds slugs, seeded rows
//! silently stop matching.

use std::sync::LazyLock;

use regex::Regex;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("static slug pattern"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("static slug pattern"));

/// Derives a URL-safe slug from a title.
///
/// Lowercases, strips everything that is not a word character, whitespace or
/// hyphen, collapses whitespace/hyphen runs into one hyphen and trims hyphens
/// from both ends. Underscores are word characters and survive at the edges.
/// Unicode letters are kept as-is.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    let joined = SEPARATORS.replace_all(&stripped, "-");
    joined.trim_matches('-').to_owned()
}
