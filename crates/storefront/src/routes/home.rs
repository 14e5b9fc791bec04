//! Home page data handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use driftwood_core::blog::BlogPost;

use crate::error::Result;
use crate::routes::products::ProductSummary;
use crate::state::AppState;

/// Number of posts shown in the home page strip.
const LATEST_POSTS: usize = 3;

/// Blog card shape used on the home page.
#[derive(Debug, Serialize)]
pub struct PostCard {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub image: Option<String>,
}

impl From<&BlogPost> for PostCard {
    fn from(p: &BlogPost) -> Self {
        Self {
            slug: p.slug.clone(),
            title: p.title.clone(),
            excerpt: p.excerpt.clone(),
            image: p.image.clone(),
        }
    }
}

/// Home page response.
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub featured: Vec<ProductSummary>,
    pub bestsellers: Vec<ProductSummary>,
    pub latest_posts: Vec<PostCard>,
}

/// GET /api/home
///
/// Both strips come from the one cached catalog read.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeResponse>> {
    let catalog = state.store().products().list_enabled().await?;

    let featured = catalog
        .iter()
        .filter(|p| p.featured)
        .map(ProductSummary::from)
        .collect();
    let bestsellers = catalog
        .iter()
        .filter(|p| p.bestseller)
        .map(ProductSummary::from)
        .collect();

    let mut posts = state.store().blog_posts().list().await?;
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let latest_posts = posts.iter().take(LATEST_POSTS).map(PostCard::from).collect();

    Ok(Json(HomeResponse {
        featured,
        bestsellers,
        latest_posts,
    }))
}
