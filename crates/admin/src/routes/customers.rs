//! Customer management handlers.
//!
//! Role changes are admin-only and may not target the caller's own account,
//! so an admin cannot demote themself into a locked-out dashboard.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use driftwood_core::orders::Order;
use driftwood_core::types::{PaymentStatus, Role, UserId};
use driftwood_core::users::User;

use crate::error::{AdminError, Result};
use crate::middleware::{RequireAdmin, RequireStaff};
use crate::state::AppState;

/// GET /api/customers
#[instrument(skip(state, _staff))]
pub async fn index(
    State(state): State<AppState>,
    _staff: RequireStaff,
) -> Result<Json<Vec<User>>> {
    let mut users = state.store().users().list().await?;
    users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(users))
}

/// GET /api/customers/{id}
#[instrument(skip(state, _staff))]
pub async fn show(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<UserId>,
) -> Result<Json<User>> {
    Ok(Json(state.store().users().get(&id).await?))
}

/// Active flag request body.
#[derive(Debug, Deserialize)]
pub struct ActiveRequest {
    pub active: bool,
}

/// POST /api/customers/{id}/active
#[instrument(skip(state, staff), fields(id = %id, active = body.active))]
pub async fn set_active(
    State(state): State<AppState>,
    staff: RequireStaff,
    Path(id): Path<UserId>,
    Json(body): Json<ActiveRequest>,
) -> Result<Json<serde_json::Value>> {
    let RequireStaff(actor) = staff;

    if actor.id == id {
        return Err(AdminError::BadRequest(
            "cannot deactivate your own account".to_owned(),
        ));
    }

    // 404 before patching.
    state.store().users().get(&id).await?;
    state.store().users().set_active(&id, body.active).await?;

    info!(user_id = %id, actor = %actor.id, active = body.active, "active flag changed");
    Ok(Json(json!({ "ok": true })))
}

/// Role change request body.
#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub role: Role,
}

/// POST /api/customers/{id}/role (admin only)
#[instrument(skip(state, admin), fields(id = %id, role = %body.role))]
pub async fn set_role(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<UserId>,
    Json(body): Json<RoleRequest>,
) -> Result<Json<serde_json::Value>> {
    let RequireAdmin(actor) = admin;

    if actor.id == id {
        return Err(AdminError::BadRequest(
            "cannot change your own role".to_owned(),
        ));
    }

    state.store().users().get(&id).await?;
    state.store().users().set_role(&id, body.role).await?;

    info!(user_id = %id, actor = %actor.id, role = %body.role, "role changed");
    Ok(Json(json!({ "ok": true })))
}

/// POST /api/customers/{id}/recompute
///
/// Rebuild the purchase aggregates from the order history. Normally they are
/// maintained incrementally as orders are marked paid; this repairs drift.
#[instrument(skip(state, staff), fields(id = %id))]
pub async fn recompute(
    State(state): State<AppState>,
    staff: RequireStaff,
    Path(id): Path<UserId>,
) -> Result<Json<serde_json::Value>> {
    let RequireStaff(actor) = staff;

    let user = state.store().users().get(&id).await?;
    let orders = state.store().orders().list_for_email(&user.email).await?;

    let paid: Vec<&Order> = orders
        .iter()
        .filter(|o| o.payment_status == PaymentStatus::Paid)
        .collect();
    let total_spent: Decimal = paid.iter().map(|o| o.total_amount).sum();
    let order_count = u32::try_from(paid.len()).unwrap_or(u32::MAX);

    state
        .store()
        .users()
        .patch(
            &id,
            &json!({
                "total_spent": total_spent,
                "order_count": order_count,
                "updated_at": chrono::Utc::now(),
            }),
        )
        .await?;

    info!(user_id = %id, actor = %actor.id, %total_spent, order_count, "aggregates recomputed");
    Ok(Json(json!({
        "total_spent": total_spent,
        "order_count": order_count,
    })))
}

/// Fold a newly paid order into the customer's aggregates. No-op when the
/// order email has no matching user document (guest checkout).
pub async fn apply_paid_order(state: &AppState, order: &Order) -> Result<()> {
    let user = match state.store().users().get_by_email(&order.customer.email).await {
        Ok(user) => user,
        Err(e) if e.is_not_found() => return Ok(()),
        Err(e) => return Err(AdminError::from(e)),
    };

    state
        .store()
        .users()
        .patch(
            &user.id,
            &json!({
                "total_spent": user.total_spent + order.total_amount,
                "order_count": user.order_count + 1,
                "updated_at": chrono::Utc::now(),
            }),
        )
        .await?;

    Ok(())
}
