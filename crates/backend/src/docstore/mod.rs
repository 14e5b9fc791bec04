//! Hosted document store client.
//!
//! The store exposes whole-document JSON CRUD per collection:
//!
//! ```text
//! GET    {base}/collections/{name}/documents        - list all documents
//! GET    {base}/collections/{name}/documents/{id}   - fetch one document
//! POST   {base}/collections/{name}/documents        - create, store assigns id
//! PUT    {base}/collections/{name}/documents/{id}   - upsert with a known id
//! PATCH  {base}/collections/{name}/documents/{id}   - merge fields
//! DELETE {base}/collections/{name}/documents/{id}   - delete
//! ```
//!
//! There is no server-side schema enforcement; documents are validated on
//! the way in by the route layer and on the way out by serde. Catalog-ish
//! collections (products, blog posts, settings) are read through a shared
//! `moka` cache so the many views that used to each hold a live listener on
//! the full collection now share one snapshot.

mod cache;
mod collections;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::DocStoreConfig;
use crate::error::DocStoreError;

use cache::CacheValue;
pub use collections::{BlogPosts, Orders, Products, Settings, Subscription, Subscriptions, Users};

/// Collection names as they exist in the hosted store.
pub mod collection_names {
    pub const PRODUCTS: &str = "products";
    pub const ORDERS: &str = "orders";
    pub const USERS: &str = "users";
    pub const BLOG_POSTS: &str = "blogPosts";
    pub const SUBSCRIPTIONS: &str = "subscriptions";
    pub const SETTINGS: &str = "settings";
}

/// Cache TTL for catalog reads.
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Client for the hosted document store.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the read
/// cache.
#[derive(Clone)]
pub struct DocStore {
    inner: Arc<DocStoreInner>,
}

struct DocStoreInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

/// Response shape of a list request.
#[derive(Debug, serde::Deserialize)]
struct ListResponse {
    documents: Vec<Value>,
}

/// Response shape of a create request.
#[derive(Debug, serde::Deserialize)]
struct CreateResponse {
    id: String,
}

impl DocStore {
    /// Create a new document store client.
    ///
    /// # Errors
    ///
    /// Returns [`DocStoreError::Config`] if the API key cannot be used as a
    /// header value or the HTTP client fails to build.
    pub fn new(config: &DocStoreConfig) -> Result<Self, DocStoreError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| DocStoreError::Config(format!("invalid API key: {e}")))?,
        );
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| DocStoreError::Config(e.to_string()))?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(DocStoreInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                cache,
            }),
        })
    }

    // =========================================================================
    // Typed collection handles
    // =========================================================================

    /// Products collection.
    #[must_use]
    pub const fn products(&self) -> Products<'_> {
        Products::new(self)
    }

    /// Orders collection.
    #[must_use]
    pub const fn orders(&self) -> Orders<'_> {
        Orders::new(self)
    }

    /// Users collection.
    #[must_use]
    pub const fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    /// Blog posts collection.
    #[must_use]
    pub const fn blog_posts(&self) -> BlogPosts<'_> {
        BlogPosts::new(self)
    }

    /// Newsletter subscriptions collection.
    #[must_use]
    pub const fn subscriptions(&self) -> Subscriptions<'_> {
        Subscriptions::new(self)
    }

    /// Settings collection (single document).
    #[must_use]
    pub const fn settings(&self) -> Settings<'_> {
        Settings::new(self)
    }

    // =========================================================================
    // Raw document operations
    // =========================================================================

    fn documents_url(&self, collection: &str) -> String {
        format!("{}/collections/{collection}/documents", self.inner.base_url)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/collections/{collection}/documents/{id}",
            self.inner.base_url
        )
    }

    /// Map a response into either its JSON body or a [`DocStoreError`].
    async fn read_response(
        response: reqwest::Response,
        context: &str,
    ) -> Result<Value, DocStoreError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(DocStoreError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DocStoreError::NotFound(context.to_owned()));
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "document store returned non-success status"
            );
            return Err(DocStoreError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch every document in a collection.
    pub(crate) async fn list_docs<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, DocStoreError> {
        let response = self
            .inner
            .client
            .get(self.documents_url(collection))
            .send()
            .await?;

        let body = Self::read_response(response, collection).await?;
        let list: ListResponse = serde_json::from_value(body)?;

        list.documents
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(DocStoreError::from))
            .collect()
    }

    /// Fetch a single document by id.
    pub(crate) async fn get_doc<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<T, DocStoreError> {
        let response = self
            .inner
            .client
            .get(self.document_url(collection, id))
            .send()
            .await?;

        let body = Self::read_response(response, &format!("{collection}/{id}")).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Create a document; the store assigns and returns the id.
    pub(crate) async fn create_doc<T: Serialize + ?Sized>(
        &self,
        collection: &str,
        doc: &T,
    ) -> Result<String, DocStoreError> {
        let response = self
            .inner
            .client
            .post(self.documents_url(collection))
            .json(doc)
            .send()
            .await?;

        let body = Self::read_response(response, collection).await?;
        let created: CreateResponse = serde_json::from_value(body)?;
        Ok(created.id)
    }

    /// Upsert a document under a known id.
    pub(crate) async fn put_doc<T: Serialize + ?Sized>(
        &self,
        collection: &str,
        id: &str,
        doc: &T,
    ) -> Result<(), DocStoreError> {
        let response = self
            .inner
            .client
            .put(self.document_url(collection, id))
            .json(doc)
            .send()
            .await?;

        Self::read_response(response, &format!("{collection}/{id}")).await?;
        Ok(())
    }

    /// Merge fields into an existing document.
    pub(crate) async fn patch_doc(
        &self,
        collection: &str,
        id: &str,
        fields: &Value,
    ) -> Result<(), DocStoreError> {
        let response = self
            .inner
            .client
            .patch(self.document_url(collection, id))
            .json(fields)
            .send()
            .await?;

        Self::read_response(response, &format!("{collection}/{id}")).await?;
        Ok(())
    }

    /// Delete a document.
    pub(crate) async fn delete_doc(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<(), DocStoreError> {
        let response = self
            .inner
            .client
            .delete(self.document_url(collection, id))
            .send()
            .await?;

        Self::read_response(response, &format!("{collection}/{id}")).await?;
        Ok(())
    }

    // =========================================================================
    // Cache plumbing
    // =========================================================================

    pub(crate) async fn cache_get(&self, key: &str) -> Option<CacheValue> {
        self.inner.cache.get(key).await
    }

    pub(crate) async fn cache_insert(&self, key: String, value: CacheValue) {
        self.inner.cache.insert(key, value).await;
    }

    pub(crate) async fn cache_invalidate(&self, key: &str) {
        self.inner.cache.invalidate(key).await;
    }

    /// Invalidate all cached reads.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}
