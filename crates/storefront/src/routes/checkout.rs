//! Checkout handler.
//!
//! Turns the session cart into an order document. Customer details are
//! snapshotted onto the order; prices come from the stored cart lines, which
//! were themselves resolved server-side at add time.

use axum::{Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::{info, instrument};

use driftwood_core::orders::{Address, CustomerSnapshot, Order, OrderItem};
use driftwood_core::types::{Email, OrderId, OrderStatus, PaymentStatus};

use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::models::CartLine;
use crate::routes::cart;
use crate::state::AppState;

/// Checkout request body. Email may be omitted by signed-in customers, whose
/// session identity fills it in.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub address: Address,
}

/// Checkout response body.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_id: OrderId,
    pub total_amount: Decimal,
    pub item_count: u32,
}

/// POST /api/checkout
#[instrument(skip(state, session, auth, body))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
    Json(body): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let lines = cart::get_lines(&session).await?;
    if lines.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_owned()));
    }

    let OptionalAuth(user) = auth;

    let email = match (body.email.as_deref(), &user) {
        (Some(raw), _) => {
            Email::parse(raw).map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?
        }
        (None, Some(user)) => user.email.clone(),
        (None, None) => return Err(AppError::BadRequest("email is required".to_owned())),
    };
    let name = body
        .name
        .or_else(|| user.as_ref().map(|u| u.name.clone()))
        .unwrap_or_default();
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_owned()));
    }

    let items: Vec<OrderItem> = lines.iter().map(to_order_item).collect();
    let total_amount: Decimal = items.iter().map(OrderItem::line_total).sum();
    let item_count = items.iter().map(|i| i.quantity).sum();

    let order = Order {
        // Placeholder; the store assigns the real id on create.
        id: OrderId::new(""),
        customer: CustomerSnapshot {
            name,
            email,
            phone: body.phone,
            address: body.address,
        },
        items,
        total_amount,
        order_status: OrderStatus::Pending,
        payment_status: PaymentStatus::Unpaid,
        created_at: Some(chrono::Utc::now()),
        updated_at: Some(chrono::Utc::now()),
    };

    let order_id = state.store().orders().create(&order).await?;
    cart::clear(&session).await?;

    info!(order_id = %order_id, %total_amount, "order placed");

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            order_id,
            total_amount,
            item_count,
        }),
    ))
}

fn to_order_item(line: &CartLine) -> OrderItem {
    OrderItem {
        product_id: line.product_id.clone(),
        variant_id: line.variant_id.clone(),
        name: line.name.clone(),
        quantity: line.quantity,
        unit_price: line.unit_price,
    }
}
