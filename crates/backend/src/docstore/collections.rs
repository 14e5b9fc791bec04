//! Typed per-collection accessors.
//!
//! Each handle borrows the shared [`DocStore`] and exposes the operations
//! the application actually performs against that collection. Catalog reads
//! go through the shared cache; every write invalidates the relevant key so
//! the next read observes it.

use driftwood_core::blog::BlogPost;
use driftwood_core::catalog::Product;
use driftwood_core::orders::Order;
use driftwood_core::types::{Email, OrderId, OrderStatus, PaymentStatus, PostId, ProductId, Role, UserId};
use driftwood_core::users::User;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use super::cache::{CacheValue, keys};
use super::{DocStore, collection_names};
use crate::error::DocStoreError;

// =============================================================================
// Products
// =============================================================================

/// Handle for the `products` collection.
pub struct Products<'a> {
    store: &'a DocStore,
}

impl<'a> Products<'a> {
    pub(crate) const fn new(store: &'a DocStore) -> Self {
        Self { store }
    }

    /// Fetch the full product list, served from the shared cache when warm.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, DocStoreError> {
        if let Some(CacheValue::Products(products)) = self.store.cache_get(keys::PRODUCTS).await {
            debug!("cache hit for products");
            return Ok(products);
        }

        let products: Vec<Product> = self.store.list_docs(collection_names::PRODUCTS).await?;

        self.store
            .cache_insert(keys::PRODUCTS.to_owned(), CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Fetch the enabled subset of the catalog (storefront view).
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn list_enabled(&self) -> Result<Vec<Product>, DocStoreError> {
        Ok(self.list().await?.into_iter().filter(|p| p.enabled).collect())
    }

    /// Fetch a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`DocStoreError::NotFound`] if no such document exists.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get(&self, id: &ProductId) -> Result<Product, DocStoreError> {
        self.store
            .get_doc(collection_names::PRODUCTS, id.as_str())
            .await
    }

    /// Fetch an enabled product by its URL slug.
    ///
    /// Resolved from the cached list; the catalog is small enough that a
    /// scan beats a second endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`DocStoreError::NotFound`] if no enabled product has the slug.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Product, DocStoreError> {
        self.list_enabled()
            .await?
            .into_iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| DocStoreError::NotFound(format!("product: {slug}")))
    }

    /// Create a product; the store assigns the id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, product), fields(slug = %product.slug))]
    pub async fn create(&self, product: &Product) -> Result<ProductId, DocStoreError> {
        let id = self
            .store
            .create_doc(collection_names::PRODUCTS, product)
            .await?;
        self.store.cache_invalidate(keys::PRODUCTS).await;
        Ok(ProductId::new(id))
    }

    /// Upsert a product under a known id (used by seeding).
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub async fn put(&self, product: &Product) -> Result<(), DocStoreError> {
        self.store
            .put_doc(collection_names::PRODUCTS, product.id.as_str(), product)
            .await?;
        self.store.cache_invalidate(keys::PRODUCTS).await;
        Ok(())
    }

    /// Replace a product document.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub async fn update(&self, product: &Product) -> Result<(), DocStoreError> {
        self.put(product).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the delete.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: &ProductId) -> Result<(), DocStoreError> {
        self.store
            .delete_doc(collection_names::PRODUCTS, id.as_str())
            .await?;
        self.store.cache_invalidate(keys::PRODUCTS).await;
        Ok(())
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Handle for the `orders` collection. Never cached - mutable state.
pub struct Orders<'a> {
    store: &'a DocStore,
}

impl<'a> Orders<'a> {
    pub(crate) const fn new(store: &'a DocStore) -> Self {
        Self { store }
    }

    /// Fetch every order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Order>, DocStoreError> {
        self.store.list_docs(collection_names::ORDERS).await
    }

    /// Fetch the orders placed under a customer email.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn list_for_email(&self, email: &Email) -> Result<Vec<Order>, DocStoreError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|o| &o.customer.email == email)
            .collect())
    }

    /// Fetch an order by id.
    ///
    /// # Errors
    ///
    /// Returns [`DocStoreError::NotFound`] if no such document exists.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get(&self, id: &OrderId) -> Result<Order, DocStoreError> {
        self.store.get_doc(collection_names::ORDERS, id.as_str()).await
    }

    /// Create an order; the store assigns the id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, order), fields(email = %order.customer.email))]
    pub async fn create(&self, order: &Order) -> Result<OrderId, DocStoreError> {
        let id = self.store.create_doc(collection_names::ORDERS, order).await?;
        Ok(OrderId::new(id))
    }

    /// Patch the fulfillment and/or payment status of an order.
    ///
    /// Transition validity is checked by the caller against the current
    /// document; the store itself enforces nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn update_status(
        &self,
        id: &OrderId,
        order_status: Option<OrderStatus>,
        payment_status: Option<PaymentStatus>,
    ) -> Result<(), DocStoreError> {
        let mut fields = serde_json::Map::new();
        if let Some(status) = order_status {
            fields.insert("order_status".to_owned(), json!(status));
        }
        if let Some(status) = payment_status {
            fields.insert("payment_status".to_owned(), json!(status));
        }
        fields.insert("updated_at".to_owned(), json!(chrono::Utc::now()));

        self.store
            .patch_doc(collection_names::ORDERS, id.as_str(), &Value::Object(fields))
            .await
    }
}

// =============================================================================
// Users
// =============================================================================

/// Handle for the `users` collection. Never cached - roles and the active
/// flag gate authorization and must be read fresh.
pub struct Users<'a> {
    store: &'a DocStore,
}

impl<'a> Users<'a> {
    pub(crate) const fn new(store: &'a DocStore) -> Self {
        Self { store }
    }

    /// Fetch every user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<User>, DocStoreError> {
        self.store.list_docs(collection_names::USERS).await
    }

    /// Fetch a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`DocStoreError::NotFound`] if no such document exists.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get(&self, id: &UserId) -> Result<User, DocStoreError> {
        self.store.get_doc(collection_names::USERS, id.as_str()).await
    }

    /// Fetch a user by email.
    ///
    /// # Errors
    ///
    /// Returns [`DocStoreError::NotFound`] if no user has the email.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn get_by_email(&self, email: &Email) -> Result<User, DocStoreError> {
        self.list()
            .await?
            .into_iter()
            .find(|u| &u.email == email)
            .ok_or_else(|| DocStoreError::NotFound(format!("user: {email}")))
    }

    /// Upsert a user document under the id issued by the auth service.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, user), fields(id = %user.id))]
    pub async fn put(&self, user: &User) -> Result<(), DocStoreError> {
        self.store
            .put_doc(collection_names::USERS, user.id.as_str(), user)
            .await
    }

    /// Patch profile fields (name, phone-adjacent data lives on orders).
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, fields), fields(id = %id))]
    pub async fn patch(&self, id: &UserId, fields: &Value) -> Result<(), DocStoreError> {
        self.store
            .patch_doc(collection_names::USERS, id.as_str(), fields)
            .await
    }

    /// Set a user's role.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self), fields(id = %id, role = %role))]
    pub async fn set_role(&self, id: &UserId, role: Role) -> Result<(), DocStoreError> {
        self.patch(id, &json!({ "role": role, "updated_at": chrono::Utc::now() }))
            .await
    }

    /// Toggle a user's active flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self), fields(id = %id, active))]
    pub async fn set_active(&self, id: &UserId, active: bool) -> Result<(), DocStoreError> {
        self.patch(id, &json!({ "active": active, "updated_at": chrono::Utc::now() }))
            .await
    }
}

// =============================================================================
// Blog posts
// =============================================================================

/// Handle for the `blogPosts` collection.
pub struct BlogPosts<'a> {
    store: &'a DocStore,
}

impl<'a> BlogPosts<'a> {
    pub(crate) const fn new(store: &'a DocStore) -> Self {
        Self { store }
    }

    /// Fetch the full post list, served from the shared cache when warm.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<BlogPost>, DocStoreError> {
        if let Some(CacheValue::BlogPosts(posts)) = self.store.cache_get(keys::BLOG_POSTS).await {
            debug!("cache hit for blog posts");
            return Ok(posts);
        }

        let posts: Vec<BlogPost> = self.store.list_docs(collection_names::BLOG_POSTS).await?;

        self.store
            .cache_insert(keys::BLOG_POSTS.to_owned(), CacheValue::BlogPosts(posts.clone()))
            .await;

        Ok(posts)
    }

    /// Fetch a post by its URL slug.
    ///
    /// # Errors
    ///
    /// Returns [`DocStoreError::NotFound`] if no post has the slug.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<BlogPost, DocStoreError> {
        self.list()
            .await?
            .into_iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| DocStoreError::NotFound(format!("blog post: {slug}")))
    }

    /// Create a post; the store assigns the id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, post), fields(slug = %post.slug))]
    pub async fn create(&self, post: &BlogPost) -> Result<PostId, DocStoreError> {
        let id = self
            .store
            .create_doc(collection_names::BLOG_POSTS, post)
            .await?;
        self.store.cache_invalidate(keys::BLOG_POSTS).await;
        Ok(PostId::new(id))
    }

    /// Upsert a post under a known id (used by seeding).
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub async fn put(&self, post: &BlogPost) -> Result<(), DocStoreError> {
        self.store
            .put_doc(collection_names::BLOG_POSTS, post.id.as_str(), post)
            .await?;
        self.store.cache_invalidate(keys::BLOG_POSTS).await;
        Ok(())
    }

    /// Replace a post document.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, post), fields(id = %post.id))]
    pub async fn update(&self, post: &BlogPost) -> Result<(), DocStoreError> {
        self.put(post).await
    }

    /// Delete a post.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the delete.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: &PostId) -> Result<(), DocStoreError> {
        self.store
            .delete_doc(collection_names::BLOG_POSTS, id.as_str())
            .await?;
        self.store.cache_invalidate(keys::BLOG_POSTS).await;
        Ok(())
    }
}

// =============================================================================
// Subscriptions
// =============================================================================

/// A newsletter subscription document.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Subscription {
    pub email: Email,
    pub subscribed_at: chrono::DateTime<chrono::Utc>,
}

/// Handle for the `subscriptions` collection.
pub struct Subscriptions<'a> {
    store: &'a DocStore,
}

impl<'a> Subscriptions<'a> {
    pub(crate) const fn new(store: &'a DocStore) -> Self {
        Self { store }
    }

    /// Fetch every subscription.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn list(&self) -> Result<Vec<Subscription>, DocStoreError> {
        self.store.list_docs(collection_names::SUBSCRIPTIONS).await
    }

    /// Record a subscription. Idempotent per email: an existing entry is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn subscribe(&self, email: &Email) -> Result<(), DocStoreError> {
        if self.list().await?.iter().any(|s| &s.email == email) {
            debug!("email already subscribed");
            return Ok(());
        }

        let subscription = Subscription {
            email: email.clone(),
            subscribed_at: chrono::Utc::now(),
        };
        self.store
            .create_doc(collection_names::SUBSCRIPTIONS, &subscription)
            .await?;
        Ok(())
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Fixed id of the single settings document.
const SETTINGS_DOC_ID: &str = "store";

/// Handle for the `settings` collection, which holds one free-form document.
pub struct Settings<'a> {
    store: &'a DocStore,
}

impl<'a> Settings<'a> {
    pub(crate) const fn new(store: &'a DocStore) -> Self {
        Self { store }
    }

    /// Fetch the settings document, served from the shared cache when warm.
    /// A missing document reads as an empty object.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<Value, DocStoreError> {
        if let Some(CacheValue::Settings(settings)) = self.store.cache_get(keys::SETTINGS).await {
            return Ok(settings);
        }

        let settings = match self
            .store
            .get_doc::<Value>(collection_names::SETTINGS, SETTINGS_DOC_ID)
            .await
        {
            Ok(value) => value,
            Err(e) if e.is_not_found() => Value::Object(serde_json::Map::new()),
            Err(e) => return Err(e),
        };

        self.store
            .cache_insert(keys::SETTINGS.to_owned(), CacheValue::Settings(settings.clone()))
            .await;

        Ok(settings)
    }

    /// Replace the settings document.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, settings))]
    pub async fn update(&self, settings: &Value) -> Result<(), DocStoreError> {
        self.store
            .put_doc(collection_names::SETTINGS, SETTINGS_DOC_ID, settings)
            .await?;
        self.store.cache_invalidate(keys::SETTINGS).await;
        Ok(())
    }
}
