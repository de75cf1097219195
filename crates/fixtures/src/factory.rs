//! Uniquely named test posts, created through either channel.
//!
//! Every post the factory creates is registered with the test's
//! [`CleanupRegistry`] before it is handed back.

use std::sync::Arc;

use tracing::info;

use postcheck_client::{POSTS_ROUTE, PostsApi};
use postcheck_core::slug::slugify;
use postcheck_core::token::{DEFAULT_PLACEHOLDER, UniquenessToken, apply_token_with};
use postcheck_core::types::{NewPost, Post, PostStatus, RenderedText};
use postcheck_storage::{PostStore, RawPost};

use crate::cleanup::CleanupRegistry;
use crate::error::FixtureError;

/// Prefix of generated titles when the caller gives none.
pub const DEFAULT_TITLE_PREFIX: &str = "Auto Test Title";
pub const DEFAULT_CONTENT: &str = "Default Content";
/// Author written by direct inserts unless overridden.
pub const DEFAULT_AUTHOR: u64 = 1;

/// Input for [`PostFactory::create_via_api`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPostSpec {
    /// `None` generates `"Auto Test Title <token>"`
    pub title: Option<String>,
    pub content: String,
    /// Sent as-is; unknown values are the API's to reject
    pub status: String,
}

impl Default for ApiPostSpec {
    fn default() -> Self {
        Self {
            title: None,
            content: DEFAULT_CONTENT.to_owned(),
            status: PostStatus::Publish.into(),
        }
    }
}

impl ApiPostSpec {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

/// Input for [`PostFactory::create_via_storage`].
///
/// One token is generated per call and substituted for every occurrence of
/// `placeholder` in both templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSpec {
    pub title_template: String,
    pub content_template: String,
    pub status: String,
    pub author: u64,
    pub placeholder: String,
}

impl SeedSpec {
    pub fn new(title_template: impl Into<String>, content_template: impl Into<String>) -> Self {
        Self {
            title_template: title_template.into(),
            content_template: content_template.into(),
            status: PostStatus::Publish.into(),
            author: DEFAULT_AUTHOR,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn author(mut self, author: u64) -> Self {
        self.author = author;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

/// A post inserted directly into storage.
#[derive(Debug, Clone, PartialEq)]
pub struct SeededPost {
    /// Shaped like an edit-context API response: raw title and content,
    /// status, author and slug
    pub post: Post,
    /// Token substituted into the templates
    pub token: UniquenessToken,
}

impl SeededPost {
    pub fn id(&self) -> u64 {
        self.post.id
    }
}

/// Creates posts and registers them for cleanup.
pub struct PostFactory<A: PostsApi, S: PostStore> {
    api: Arc<A>,
    registry: Arc<CleanupRegistry<S>>,
}

impl<A: PostsApi, S: PostStore> Clone for PostFactory<A, S> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<A: PostsApi, S: PostStore> PostFactory<A, S> {
    pub fn new(api: Arc<A>, registry: Arc<CleanupRegistry<S>>) -> Self {
        Self { api, registry }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        self.registry.store()
    }

    pub fn registry(&self) -> &CleanupRegistry<S> {
        &self.registry
    }

    /// Creates a post through the API and returns it as the API echoed it.
    ///
    /// Anything other than `201 Created` is a setup failure.
    pub async fn create_via_api(&self, spec: &ApiPostSpec) -> Result<Post, FixtureError> {
        self.registry.ensure_open()?;

        let title = match &spec.title {
            Some(title) => title.clone(),
            None => format!("{DEFAULT_TITLE_PREFIX} {}", UniquenessToken::generate()),
        };
        let payload = NewPost::new(title.clone(), spec.content.clone(), spec.status.clone());

        let response = self.api.create_post(&payload).await?;
        if response.status_code() != 201 {
            return Err(FixtureError::Setup {
                title,
                status: response.status_code(),
                body: response.text().to_owned(),
            });
        }

        let body = response.json_value()?;
        let id = body
            .get("id")
            .and_then(|id| id.as_u64())
            .filter(|id| *id > 0)
            .ok_or_else(|| FixtureError::MissingId {
                title: title.clone(),
            })?;
        self.registry.register(id)?;

        let post: Post = response.json()?;
        info!(post_id = id, title = %title, route = POSTS_ROUTE, "fixture post created via api");
        Ok(post)
    }

    /// Inserts a post row directly, bypassing API validation.
    pub async fn create_via_storage(&self, spec: &SeedSpec) -> Result<SeededPost, FixtureError> {
        self.registry.ensure_open()?;

        let token = UniquenessToken::generate();
        let title = apply_token_with(&spec.title_template, &spec.placeholder, &token);
        let content = apply_token_with(&spec.content_template, &spec.placeholder, &token);

        let raw = RawPost {
            title,
            content,
            status: spec.status.clone(),
            author: spec.author,
        };
        let id = self.store().insert_raw(&raw).await?;
        self.registry.register(id)?;

        info!(post_id = id, title = %raw.title, status = %raw.status, "fixture post seeded via storage");

        let slug = slugify(&raw.title);
        let post = Post {
            id,
            title: RenderedText::raw(raw.title),
            content: RenderedText::raw(raw.content),
            status: raw.status,
            author: Some(raw.author),
            slug: Some(slug),
            date: None,
            modified: None,
        };
        Ok(SeededPost { post, token })
    }
}
