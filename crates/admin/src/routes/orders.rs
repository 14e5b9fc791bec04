//! Order management handlers.
//!
//! Status changes go through the lifecycle validation in the core crate; the
//! document store itself accepts any patch, so the check happens here against
//! the current document.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use driftwood_core::orders::Order;
use driftwood_core::types::{OrderId, OrderStatus, PaymentStatus};

use crate::error::{AdminError, Result};
use crate::middleware::RequireStaff;
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub payment: Option<PaymentStatus>,
}

/// GET /api/orders
///
/// Newest first, optionally filtered by fulfillment or payment status.
#[instrument(skip(state, _staff))]
pub async fn index(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Order>>> {
    let mut orders = state.store().orders().list().await?;

    if let Some(status) = query.status {
        orders.retain(|o| o.order_status == status);
    }
    if let Some(payment) = query.payment {
        orders.retain(|o| o.payment_status == payment);
    }
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(orders))
}

/// GET /api/orders/{id}
#[instrument(skip(state, _staff))]
pub async fn show(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    Ok(Json(state.store().orders().get(&id).await?))
}

/// Status change request body. At least one of the fields must be set.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    #[serde(default)]
    pub order_status: Option<OrderStatus>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
}

/// PATCH /api/orders/{id}/status
#[instrument(skip(state, staff), fields(id = %id))]
pub async fn update_status(
    State(state): State<AppState>,
    staff: RequireStaff,
    Path(id): Path<OrderId>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<serde_json::Value>> {
    let RequireStaff(actor) = staff;

    if body.order_status.is_none() && body.payment_status.is_none() {
        return Err(AdminError::BadRequest(
            "no status change requested".to_owned(),
        ));
    }

    let order = state.store().orders().get(&id).await?;

    // Validate both transitions before writing either.
    let next_order = body
        .order_status
        .map(|next| order.order_status.transition_to(next))
        .transpose()?;
    let next_payment = body
        .payment_status
        .map(|next| order.payment_status.transition_to(next))
        .transpose()?;

    state
        .store()
        .orders()
        .update_status(&id, next_order, next_payment)
        .await?;

    // A newly paid order feeds the customer's purchase aggregates.
    if next_payment == Some(PaymentStatus::Paid) {
        super::customers::apply_paid_order(&state, &order).await?;
    }

    info!(
        order_id = %id,
        actor = %actor.id,
        order_status = ?next_order,
        payment_status = ?next_payment,
        "order status updated"
    );

    Ok(Json(json!({ "ok": true })))
}
