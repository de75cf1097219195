//! Authenticated calls to the posts endpoint.
//!
//! Every call shares one timeout and one set of basic-auth credentials, and
//! returns the status and body as received. Deciding what a 4xx means is the
//! caller's job.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Url};
use tracing::debug;

use postcheck_core::config::ApiConfig;
use postcheck_core::types::{NewPost, PostPatch};

use crate::error::ClientError;
use crate::response::ApiResponse;

/// Route of the posts collection, relative to the API root.
pub const POSTS_ROUTE: &str = "wp/v2/posts";

/// HTTP client bound to one API root and one set of credentials.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    http: Client,
    base: Url,
    user: String,
    password: String,
}

impl ResourceClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let base = normalize_base(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            base,
            user: config.user.clone(),
            password: config.password.clone(),
        })
    }

    /// API root, always ending with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolves `path` against the API root.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::InvalidUrl {
                url: format!("{}{path}", self.base),
                reason: e.to_string(),
            })
    }

    /// Starts an authenticated request; default headers are added on send.
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(&self.user, Some(&self.password))
    }

    async fn send<F>(&self, method: Method, url: Url, decorate: F) -> Result<ApiResponse, ClientError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let label = method.to_string();
        let request_error = |source| ClientError::Request {
            method: label.clone(),
            url: url.to_string(),
            source,
        };

        let request = decorate(self.request(method.clone(), url.clone()))
            .build()
            .map_err(request_error)?;
        let final_url = request.url().clone();

        let response = self.http.execute(request).await.map_err(request_error)?;
        let status = response.status();
        let body = response.text().await.map_err(request_error)?;

        debug!(
            method = %method,
            url = %final_url,
            status = status.as_u16(),
            bytes = body.len(),
            "api call finished"
        );
        Ok(ApiResponse::new(status, body))
    }

    fn post_url(&self, id: u64) -> Result<Url, ClientError> {
        self.endpoint(&format!("{POSTS_ROUTE}/{id}"))
    }

    /// `POST wp/v2/posts`
    pub async fn create_post(&self, payload: &NewPost) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint(POSTS_ROUTE)?;
        self.send(Method::POST, url, |req| req.json(payload)).await
    }

    /// `GET wp/v2/posts/{id}`, e.g. with `[("context", "edit")]`.
    pub async fn get_post(
        &self,
        id: u64,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, ClientError> {
        let url = self.post_url(id)?;
        self.send(Method::GET, url, |req| req.query(query)).await
    }

    /// `GET wp/v2/posts`, e.g. with `[("include", "3,4")]`.
    pub async fn list_posts(&self, query: &[(&str, &str)]) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint(POSTS_ROUTE)?;
        self.send(Method::GET, url, |req| req.query(query)).await
    }

    /// `POST wp/v2/posts/{id}` with only the fields set in `patch`.
    pub async fn update_post(&self, id: u64, patch: &PostPatch) -> Result<ApiResponse, ClientError> {
        let url = self.post_url(id)?;
        self.send(Method::POST, url, |req| req.json(patch)).await
    }

    /// `DELETE wp/v2/posts/{id}?force=...`. Without force the post is trashed.
    pub async fn delete_post(&self, id: u64, force: bool) -> Result<ApiResponse, ClientError> {
        let url = self.post_url(id)?;
        let force = if force { "true" } else { "false" };
        self.send(Method::DELETE, url, |req| req.query(&[("force", force)]))
            .await
    }
}

fn normalize_base(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    };

    let url = Url::parse(&with_slash).map_err(|e| ClientError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl {
            url: raw.to_owned(),
            reason: "cannot be used as a base URL".to_owned(),
        });
    }
    Ok(url)
}
