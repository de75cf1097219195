//! Uniqueness tokens for test data.
//!
//! A token is embedded in generated titles and content so that content-based
//! lookups (such as "exists by title") never collide across runs.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marker replaced by [`apply_token`].
pub const DEFAULT_PLACEHOLDER: &str = "{uuid}";

/// A freshly generated random identifier (UUID v4, hyphenated).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniquenessToken(String);

impl UniquenessToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UniquenessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UniquenessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Replaces every [`DEFAULT_PLACEHOLDER`] in `template` with `token`.
pub fn apply_token(template: &str, token: &UniquenessToken) -> String {
    apply_token_with(template, DEFAULT_PLACEHOLDER, token)
}

/// Replaces every occurrence of `placeholder` in `template` with `token`.
///
/// An empty placeholder leaves the template untouched.
pub fn apply_token_with(template: &str, placeholder: &str, token: &UniquenessToken) -> String {
    if placeholder.is_empty() {
        return template.to_owned();
    }
    template.replace(placeholder, token.as_str())
}
