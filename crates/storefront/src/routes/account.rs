//! Account route handlers (require auth).

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use driftwood_core::orders::Order;
use driftwood_core::types::{OrderStatus, PaymentStatus};

use crate::error::{AppError, Result};
use crate::middleware::{RequireAuth, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Profile response shape.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub total_spent: Decimal,
    pub order_count: u32,
}

/// GET /api/account
#[instrument(skip(state, auth))]
pub async fn show(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<Json<ProfileResponse>> {
    let RequireAuth(user) = auth;
    let profile = state.store().users().get(&user.id).await?;

    Ok(Json(ProfileResponse {
        id: profile.id.to_string(),
        name: profile.name,
        email: profile.email.to_string(),
        total_spent: profile.total_spent,
        order_count: profile.order_count,
    }))
}

/// Profile update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub name: String,
}

/// PATCH /api/account
#[instrument(skip(state, session, auth, body))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    auth: RequireAuth,
    Json(body): Json<UpdateRequest>,
) -> Result<Json<serde_json::Value>> {
    let RequireAuth(user) = auth;

    let name = body.name.trim().to_owned();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_owned()));
    }

    state
        .store()
        .users()
        .patch(
            &user.id,
            &json!({ "name": name, "updated_at": chrono::Utc::now() }),
        )
        .await?;

    // Keep the session identity in step with the document.
    let current = CurrentUser { name, ..user };
    set_current_user(&session, &current).await?;

    Ok(Json(json!({ "ok": true })))
}

/// Order history entry.
#[derive(Debug, Serialize)]
pub struct OrderView {
    pub id: String,
    pub total_amount: Decimal,
    pub item_count: u32,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<&Order> for OrderView {
    fn from(o: &Order) -> Self {
        Self {
            id: o.id.to_string(),
            total_amount: o.total_amount,
            item_count: o.item_count(),
            order_status: o.order_status,
            payment_status: o.payment_status,
            created_at: o.created_at,
        }
    }
}

/// GET /api/account/orders
///
/// Orders are tied to the email snapshotted at checkout, newest first.
#[instrument(skip(state, auth))]
pub async fn orders(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<Json<Vec<OrderView>>> {
    let RequireAuth(user) = auth;

    let mut orders = state.store().orders().list_for_email(&user.email).await?;
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(orders.iter().map(OrderView::from).collect()))
}
