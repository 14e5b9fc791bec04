//! Blog route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use driftwood_core::blog::BlogPost;

use crate::error::Result;
use crate::state::AppState;

/// Listing card shape; content is only sent on the detail route.
#[derive(Debug, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub excerpt: String,
    pub image: Option<String>,
    pub featured: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<&BlogPost> for PostSummary {
    fn from(p: &BlogPost) -> Self {
        Self {
            slug: p.slug.clone(),
            title: p.title.clone(),
            author: p.author.clone(),
            excerpt: p.excerpt.clone(),
            image: p.image.clone(),
            featured: p.featured,
            created_at: p.created_at,
        }
    }
}

/// GET /api/blog
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<PostSummary>>> {
    let mut posts = state.store().blog_posts().list().await?;
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(posts.iter().map(PostSummary::from).collect()))
}

/// GET /api/blog/{slug}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>> {
    let post = state.store().blog_posts().get_by_slug(&slug).await?;
    Ok(Json(post))
}
