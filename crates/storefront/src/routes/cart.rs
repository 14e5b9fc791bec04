//! Cart route handlers.
//!
//! The cart is a line array in the session. Clients send product/variant ids
//! and quantities only; unit prices are resolved here from the catalog so a
//! tampered request cannot set its own price.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use driftwood_core::types::{ProductId, VariantId};

use crate::error::{AppError, Result};
use crate::models::{CartLine, CartView, session_keys};
use crate::state::AppState;

/// Ceiling on a single line's quantity, to keep mistyped quantities from
/// producing absurd orders.
const MAX_LINE_QUANTITY: u32 = 99;

/// Read the cart lines from the session.
pub async fn get_lines(session: &Session) -> Result<Vec<CartLine>> {
    Ok(session
        .get::<Vec<CartLine>>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Write the cart lines back to the session.
pub async fn set_lines(session: &Session, lines: &Vec<CartLine>) -> Result<()> {
    session.insert(session_keys::CART, lines).await?;
    Ok(())
}

/// Clear the cart (after checkout).
pub async fn clear(session: &Session) -> Result<()> {
    session.remove::<Vec<CartLine>>(session_keys::CART).await?;
    Ok(())
}

/// GET /api/cart
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let lines = get_lines(&session).await?;
    Ok(Json(CartView::from_lines(lines)))
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddRequest {
    pub product_id: ProductId,
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// POST /api/cart/add
///
/// Adding an existing product+variant selection merges quantities rather
/// than creating a second line.
#[instrument(skip(state, session), fields(product_id = %body.product_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<AddRequest>,
) -> Result<(StatusCode, Json<CartView>)> {
    if body.quantity == 0 || body.quantity > MAX_LINE_QUANTITY {
        return Err(AppError::BadRequest(format!(
            "quantity must be between 1 and {MAX_LINE_QUANTITY}"
        )));
    }

    let product = state.store().products().get(&body.product_id).await?;
    if !product.enabled {
        return Err(AppError::NotFound(format!("product: {}", body.product_id)));
    }
    if let Some(variant_id) = &body.variant_id
        && product.variant(variant_id).is_none()
    {
        return Err(AppError::BadRequest(format!(
            "unknown variant: {variant_id}"
        )));
    }

    let unit_price = product.price_for_variant(body.variant_id.as_ref());
    let variant_label = body
        .variant_id
        .as_ref()
        .and_then(|id| product.variant(id))
        .map(driftwood_core::catalog::Variant::label);

    let mut lines = get_lines(&session).await?;
    if let Some(line) = lines
        .iter_mut()
        .find(|l| l.same_selection(&body.product_id, body.variant_id.as_ref()))
    {
        line.quantity = (line.quantity + body.quantity).min(MAX_LINE_QUANTITY);
        // Re-resolve the price so a stale line picks up catalog changes.
        line.unit_price = unit_price;
    } else {
        lines.push(CartLine {
            product_id: body.product_id,
            variant_id: body.variant_id,
            name: product.name.clone(),
            variant_label,
            unit_price,
            quantity: body.quantity,
            image: product.primary_image().map(|i| i.url.clone()),
        });
    }

    set_lines(&session, &lines).await?;
    Ok((StatusCode::CREATED, Json(CartView::from_lines(lines))))
}

/// Update/remove request body.
#[derive(Debug, Deserialize)]
pub struct LineRequest {
    pub product_id: ProductId,
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    #[serde(default)]
    pub quantity: u32,
}

/// POST /api/cart/update
///
/// Sets a line's quantity; zero removes the line.
#[instrument(skip(session), fields(product_id = %body.product_id))]
pub async fn update(session: Session, Json(body): Json<LineRequest>) -> Result<Json<CartView>> {
    if body.quantity > MAX_LINE_QUANTITY {
        return Err(AppError::BadRequest(format!(
            "quantity must be at most {MAX_LINE_QUANTITY}"
        )));
    }

    let mut lines = get_lines(&session).await?;
    let position = lines
        .iter()
        .position(|l| l.same_selection(&body.product_id, body.variant_id.as_ref()))
        .ok_or_else(|| AppError::NotFound("cart line".to_owned()))?;

    if body.quantity == 0 {
        lines.remove(position);
    } else if let Some(line) = lines.get_mut(position) {
        line.quantity = body.quantity;
    }

    set_lines(&session, &lines).await?;
    Ok(Json(CartView::from_lines(lines)))
}

/// POST /api/cart/remove
#[instrument(skip(session), fields(product_id = %body.product_id))]
pub async fn remove(session: Session, Json(body): Json<LineRequest>) -> Result<Json<CartView>> {
    let mut lines = get_lines(&session).await?;
    lines.retain(|l| !l.same_selection(&body.product_id, body.variant_id.as_ref()));

    set_lines(&session, &lines).await?;
    Ok(Json(CartView::from_lines(lines)))
}

/// GET /api/cart/count
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<serde_json::Value>> {
    let lines = get_lines(&session).await?;
    let count: u32 = lines.iter().map(|l| l.quantity).sum();
    Ok(Json(json!({ "count": count })))
}
