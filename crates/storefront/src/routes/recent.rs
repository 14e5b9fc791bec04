//! Recently-viewed products.
//!
//! A capped product-id list in the session, newest first. Viewing a product
//! moves it to the front; the list never exceeds [`RECENT_LIMIT`] entries.

use axum::{Json, extract::State};
use tower_sessions::Session;
use tracing::instrument;

use driftwood_core::types::ProductId;

use crate::error::Result;
use crate::models::session_keys;
use crate::routes::products::{ProductSummary, lookup_enabled};
use crate::state::AppState;

/// Maximum number of recently-viewed entries kept per session.
pub const RECENT_LIMIT: usize = 8;

/// Record a product view, called from the product detail handler.
pub async fn record_view(session: &Session, id: &ProductId) -> Result<()> {
    let mut ids = session
        .get::<Vec<ProductId>>(session_keys::RECENTLY_VIEWED)
        .await?
        .unwrap_or_default();

    ids.retain(|existing| existing != id);
    ids.insert(0, id.clone());
    ids.truncate(RECENT_LIMIT);

    session.insert(session_keys::RECENTLY_VIEWED, &ids).await?;
    Ok(())
}

/// GET /api/recently-viewed
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<ProductSummary>>> {
    let ids = session
        .get::<Vec<ProductId>>(session_keys::RECENTLY_VIEWED)
        .await?
        .unwrap_or_default();

    let mut products = Vec::with_capacity(ids.len());
    for id in &ids {
        if let Some(product) = lookup_enabled(&state, id).await? {
            products.push(ProductSummary::from(&product));
        }
    }

    Ok(Json(products))
}
