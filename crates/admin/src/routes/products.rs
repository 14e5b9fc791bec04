//! Product management handlers.
//!
//! Mutations validate the document before it reaches the store: prices must
//! be non-negative, percentage discounts must stay within 0-100, and slugs
//! must be unique. Reads are open to all staff; writes require admin.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{info, instrument};

use driftwood_core::catalog::Product;
use driftwood_core::pricing::{Discount, DiscountKind};
use driftwood_core::types::ProductId;

use crate::error::{AdminError, Result};
use crate::middleware::{RequireAdmin, RequireStaff};
use crate::state::AppState;

/// Validate a product document before writing it.
fn validate(product: &Product) -> Result<()> {
    if product.name.trim().is_empty() {
        return Err(AdminError::BadRequest("name must not be empty".to_owned()));
    }
    if product.slug.trim().is_empty() {
        return Err(AdminError::BadRequest("slug must not be empty".to_owned()));
    }
    if product.base_price < Decimal::ZERO {
        return Err(AdminError::BadRequest(
            "base price must not be negative".to_owned(),
        ));
    }
    if let Some(discount) = &product.discount {
        validate_discount(discount)?;
    }
    for variant in &product.variants {
        if let Some(price) = variant.price
            && price < Decimal::ZERO
        {
            return Err(AdminError::BadRequest(format!(
                "variant {} price must not be negative",
                variant.id
            )));
        }
    }
    Ok(())
}

fn validate_discount(discount: &Discount) -> Result<()> {
    match discount.kind {
        DiscountKind::Percentage => {
            if discount.value < Decimal::ZERO || discount.value > Decimal::ONE_HUNDRED {
                return Err(AdminError::BadRequest(
                    "percentage discount must be between 0 and 100".to_owned(),
                ));
            }
        }
        DiscountKind::Flat => {
            if discount.value < Decimal::ZERO {
                return Err(AdminError::BadRequest(
                    "flat discount must not be negative".to_owned(),
                ));
            }
        }
    }
    Ok(())
}

/// Check that no other product claims the slug.
async fn check_slug_unique(
    state: &AppState,
    slug: &str,
    own_id: Option<&ProductId>,
) -> Result<()> {
    let taken = state
        .store()
        .products()
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

/// GET /api/products
///
/// The full catalog, disabled products included.
#[instrument(skip(state, _staff))]
pub async fn index(
    State(state): State<AppState>,
    _staff: RequireStaff,
) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.store().products().list().await?))
}

/// GET /api/products/{id}
#[instrument(skip(state, _staff))]
pub async fn show(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    Ok(Json(state.store().products().get(&id).await?))
}

/// POST /api/products
#[instrument(skip(state, admin, product), fields(slug = %product.slug))]
pub async fn create(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Json(mut product): Json<Product>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let RequireAdmin(actor) = admin;

    validate(&product)?;
    check_slug_unique(&state, &product.slug, None).await?;

    let now = chrono::Utc::now();
    product.created_at = Some(now);
    product.updated_at = Some(now);

    let id = state.store().products().create(&product).await?;

    info!(product_id = %id, actor = %actor.id, "product created");
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// PUT /api/products/{id}
#[instrument(skip(state, admin, product), fields(id = %id))]
pub async fn update(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<ProductId>,
    Json(mut product): Json<Product>,
) -> Result<Json<serde_json::Value>> {
    let RequireAdmin(actor) = admin;

    // The path is authoritative for the id.
    product.id = id;
    validate(&product)?;
    check_slug_unique(&state, &product.slug, Some(&product.id)).await?;

    // 404 for unknown ids rather than upserting.
    let existing = state.store().products().get(&product.id).await?;
    product.created_at = existing.created_at;
    product.updated_at = Some(chrono::Utc::now());

    state.store().products().update(&product).await?;

    info!(product_id = %product.id, actor = %actor.id, "product updated");
    Ok(Json(json!({ "ok": true })))
}

/// DELETE /api/products/{id}
#[instrument(skip(state, admin), fields(id = %id))]
pub async fn destroy(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    let RequireAdmin(actor) = admin;

    // Confirm existence first so deletes of unknown ids 404.
    state.store().products().get(&id).await?;
    state.store().products().delete(&id).await?;

    info!(product_id = %id, actor = %actor.id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use driftwood_core::catalog::Seo;

    use super::*;

    fn product() -> Product {
        Product {
            id: ProductId::new("prod_1"),
            name: "Alder Bench".to_owned(),
            slug: "alder-bench".to_owned(),
            description: String::new(),
            base_price: dec!(240),
            discount: None,
            category: "furniture".to_owned(),
            stock: 3,
            rating: None,
            images: Vec::new(),
            primary_image: 0,
            variants: Vec::new(),
            enabled: true,
            featured: false,
            bestseller: false,
            seo: Seo::default(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_validate_accepts_plain_product() {
        assert!(validate(&product()).is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let mut p = product();
        p.base_price = dec!(-1);
        assert!(validate(&p).is_err());
    }

    #[test]
    fn test_validate_discount_bounds() {
        assert!(validate_discount(&Discount::percentage(dec!(100))).is_ok());
        assert!(validate_discount(&Discount::percentage(dec!(100.01))).is_err());
        assert!(validate_discount(&Discount::percentage(dec!(-5))).is_err());
        assert!(validate_discount(&Discount::flat(dec!(600))).is_ok());
        assert!(validate_discount(&Discount::flat(dec!(-1))).is_err());
    }
}
