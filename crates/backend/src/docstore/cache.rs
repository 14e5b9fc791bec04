//! Cache types for document store reads.

use driftwood_core::blog::BlogPost;
use driftwood_core::catalog::Product;
use serde_json::Value;

/// Cache keys for the shared read cache.
pub mod keys {
    pub const PRODUCTS: &str = "products:all";
    pub const BLOG_POSTS: &str = "blog_posts:all";
    pub const SETTINGS: &str = "settings";
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Vec<Product>),
    BlogPosts(Vec<BlogPost>),
    Settings(Value),
}
