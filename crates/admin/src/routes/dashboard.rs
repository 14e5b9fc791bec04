//! Dashboard summary handler.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use driftwood_core::types::{OrderStatus, PaymentStatus};

use crate::error::Result;
use crate::middleware::RequireStaff;
use crate::state::AppState;

/// Dashboard summary response.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub product_count: usize,
    pub enabled_product_count: usize,
    pub order_count: usize,
    pub pending_order_count: usize,
    pub customer_count: usize,
    /// Revenue across paid orders.
    pub revenue: Decimal,
}

/// GET /api/dashboard
#[instrument(skip(state, _staff))]
pub async fn summary(
    State(state): State<AppState>,
    _staff: RequireStaff,
) -> Result<Json<SummaryResponse>> {
    let products = state.store().products().list().await?;
    let orders = state.store().orders().list().await?;
    let users = state.store().users().list().await?;

    let revenue = orders
        .iter()
        .filter(|o| o.payment_status == PaymentStatus::Paid)
        .map(|o| o.total_amount)
        .sum();

    Ok(Json(SummaryResponse {
        product_count: products.len(),
        enabled_product_count: products.iter().filter(|p| p.enabled).count(),
        order_count: orders.len(),
        pending_order_count: orders
            .iter()
            .filter(|o| o.order_status == OrderStatus::Pending)
            .count(),
        customer_count: users
            .iter()
            .filter(|u| !u.role.is_staff())
            .count(),
        revenue,
    }))
}
