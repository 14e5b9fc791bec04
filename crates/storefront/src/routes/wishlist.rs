//! Wishlist handlers.
//!
//! The wishlist is a product-id array in the session; listing resolves the
//! ids against the catalog, silently dropping products that have since been
//! disabled or deleted.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tower_sessions::Session;
use tracing::instrument;

use driftwood_core::types::ProductId;

use crate::error::Result;
use crate::models::session_keys;
use crate::routes::products::{ProductSummary, lookup_enabled};
use crate::state::AppState;

async fn get_ids(session: &Session) -> Result<Vec<ProductId>> {
    Ok(session
        .get::<Vec<ProductId>>(session_keys::WISHLIST)
        .await?
        .unwrap_or_default())
}

async fn set_ids(session: &Session, ids: &Vec<ProductId>) -> Result<()> {
    session.insert(session_keys::WISHLIST, ids).await?;
    Ok(())
}

/// GET /api/wishlist
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<ProductSummary>>> {
    let ids = get_ids(&session).await?;

    let mut products = Vec::with_capacity(ids.len());
    for id in &ids {
        if let Some(product) = lookup_enabled(&state, id).await? {
            products.push(ProductSummary::from(&product));
        }
    }

    Ok(Json(products))
}

/// POST /api/wishlist/{id}
///
/// Idempotent: adding an already-wishlisted product is a no-op.
#[instrument(skip(session))]
pub async fn add(session: Session, Path(id): Path<ProductId>) -> Result<StatusCode> {
    let mut ids = get_ids(&session).await?;
    if !ids.contains(&id) {
        ids.push(id);
        set_ids(&session, &ids).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/wishlist/{id}
#[instrument(skip(session))]
pub async fn remove(session: Session, Path(id): Path<ProductId>) -> Result<StatusCode> {
    let mut ids = get_ids(&session).await?;
    ids.retain(|existing| existing != &id);
    set_ids(&session, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
