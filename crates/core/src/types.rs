//! Post resource types as seen through both channels.
//!
//! [`Post`] is the REST representation, [`PostRow`] the storage row. Both keep
//! text fields as plain `String`s so comparisons across channels are byte-exact.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Post statuses the API accepts.
///
/// Payloads carry the status as a free-form string, so unknown values still
/// reach the API and get rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Publish,
    Future,
    Draft,
    Pending,
    Private,
}

impl PostStatus {
    pub const ALL: [PostStatus; 5] = [
        PostStatus::Publish,
        PostStatus::Future,
        PostStatus::Draft,
        PostStatus::Pending,
        PostStatus::Private,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Future => "future",
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Private => "private",
        }
    }

    /// Returns `None` for anything outside the accepted set.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PostStatus> for String {
    fn from(status: PostStatus) -> Self {
        status.as_str().to_owned()
    }
}

/// A text field the API returns in both raw and rendered form.
///
/// `raw` is only present in `context=edit` responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,
}

impl RenderedText {
    /// A field carrying only the raw value, as produced by direct inserts.
    pub fn raw(value: impl Into<String>) -> Self {
        Self {
            raw: Some(value.into()),
            rendered: None,
        }
    }

    /// The raw value, or `""` when the response had no edit context.
    pub fn raw_str(&self) -> &str {
        self.raw.as_deref().unwrap_or_default()
    }
}

/// REST representation of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub title: RenderedText,
    #[serde(default)]
    pub content: RenderedText,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

/// Create payload for `POST /wp/v2/posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub status: String,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            status: status.into(),
        }
    }
}

/// Partial update payload for `POST /wp/v2/posts/{id}`; unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl PostPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Body of `DELETE /wp/v2/posts/{id}?force=true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedPost {
    pub deleted: bool,
    pub previous: Post,
}

/// Error body the API returns for 4xx/5xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

impl ApiErrorBody {
    /// Names of the parameters the API flagged as invalid (`data.params` keys).
    pub fn invalid_params(&self) -> Vec<String> {
        self.data
            .get("params")
            .and_then(Value::as_object)
            .map(|params| params.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// Storage row of the posts table, limited to the columns the harness reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRow {
    #[serde(rename = "ID")]
    pub id: u64,
    pub post_title: String,
    pub post_content: String,
    pub post_status: String,
    #[serde(default)]
    pub post_author: u64,
    #[serde(default)]
    pub post_name: String,
}
