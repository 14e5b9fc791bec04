//! Blog post management handlers.
//!
//! Reads are open to all staff; mutations require the admin role, same as
//! products and settings.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::{info, instrument};

use driftwood_core::blog::BlogPost;
use driftwood_core::types::PostId;

use crate::error::{AdminError, Result};
use crate::middleware::{RequireAdmin, RequireStaff};
use crate::state::AppState;

fn validate(post: &BlogPost) -> Result<()> {
    if post.title.trim().is_empty() {
        return Err(AdminError::BadRequest("title must not be empty".to_owned()));
    }
    if post.slug.trim().is_empty() {
        return Err(AdminError::BadRequest("slug must not be empty".to_owned()));
    }
    Ok(())
}

/// Check that no other post claims the slug.
async fn check_slug_unique(state: &AppState, slug: &str, own_id: Option<&PostId>) -> Result<()> {
    let taken = state
        .store()
        .blog_posts()
        .list()
        .await?
        .iter()
        .any(|p| p.slug == slug && own_id != Some(&p.id));

    if taken {
        return Err(AdminError::BadRequest(format!(
            "slug already in use: {slug}"
        )));
    }
    Ok(())
}

/// GET /api/blog
#[instrument(skip(state, _staff))]
pub async fn index(
    State(state): State<AppState>,
    _staff: RequireStaff,
) -> Result<Json<Vec<BlogPost>>> {
    let mut posts = state.store().blog_posts().list().await?;
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(posts))
}

/// GET /api/blog/{id}
#[instrument(skip(state, _staff))]
pub async fn show(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<PostId>,
) -> Result<Json<BlogPost>> {
    let post = state
        .store()
        .blog_posts()
        .list()
        .await?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AdminError::NotFound(format!("blog post: {id}")))?;
    Ok(Json(post))
}

/// POST /api/blog
#[instrument(skip(state, staff, post), fields(slug = %post.slug))]
pub async fn create(
    State(state): State<AppState>,
    staff: RequireAdmin,
    Json(mut post): Json<BlogPost>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let RequireAdmin(actor) = staff;

    validate(&post)?;
    check_slug_unique(&state, &post.slug, None).await?;

    let now = chrono::Utc::now();
    post.created_at = Some(now);
    post.updated_at = Some(now);

    let id = state.store().blog_posts().create(&post).await?;

    info!(post_id = %id, actor = %actor.id, "blog post created");
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// PUT /api/blog/{id}
#[instrument(skip(state, staff, post), fields(id = %id))]
pub async fn update(
    State(state): State<AppState>,
    staff: RequireAdmin,
    Path(id): Path<PostId>,
    Json(mut post): Json<BlogPost>,
) -> Result<Json<serde_json::Value>> {
    let RequireAdmin(actor) = staff;

    post.id = id;
    validate(&post)?;
    check_slug_unique(&state, &post.slug, Some(&post.id)).await?;

    let existing = state
        .store()
        .blog_posts()
        .list()
        .await?
        .into_iter()
        .find(|p| p.id == post.id)
        .ok_or_else(|| AdminError::NotFound(format!("blog post: {}", post.id)))?;

    post.created_at = existing.created_at;
    post.updated_at = Some(chrono::Utc::now());

    state.store().blog_posts().update(&post).await?;

    info!(post_id = %post.id, actor = %actor.id, "blog post updated");
    Ok(Json(json!({ "ok": true })))
}

/// DELETE /api/blog/{id}
#[instrument(skip(state, staff), fields(id = %id))]
pub async fn destroy(
    State(state): State<AppState>,
    staff: RequireAdmin,
    Path(id): Path<PostId>,
) -> Result<StatusCode> {
    let RequireAdmin(actor) = staff;

    let exists = state
        .store()
        .blog_posts()
        .list()
        .await?
        .iter()
        .any(|p| p.id == id);
    if !exists {
        return Err(AdminError::NotFound(format!("blog post: {id}")));
    }

    state.store().blog_posts().delete(&id).await?;

    info!(post_id = %id, actor = %actor.id, "blog post deleted");
    Ok(StatusCode::NO_CONTENT)
}
