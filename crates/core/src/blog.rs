//! Blog post records mirrored from the `blogPosts` collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Seo;
use crate::types::PostId;

/// A blog post document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub author: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub seo: Seo,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialization_defaults() {
        let post: BlogPost = serde_json::from_str(
            r#"{
                "id": "post_1",
                "title": "Caring for wool rugs",
                "slug": "caring-for-wool-rugs",
                "author": "Mara Ellis"
            }"#,
        )
        .unwrap();

        assert!(!post.featured);
        assert!(post.image.is_none());
        assert!(post.excerpt.is_empty());
    }
}
