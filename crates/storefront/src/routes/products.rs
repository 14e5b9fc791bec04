//! Product listing and detail handlers.
//!
//! Listing pulls the full enabled catalog (one cached read), then filters and
//! sorts in memory. Detail resolves per-variant prices server-side and
//! records the product in the session's recently-viewed list.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use driftwood_core::catalog::Product;
use driftwood_core::filter::{ProductFilter, SortKey, sort_products};

use crate::error::{AppError, Result};
use crate::routes::recent;
use crate::state::AppState;

/// Number of related products returned on the detail page.
const RELATED_LIMIT: usize = 4;

/// Listing card shape. Prices are finalized before they leave the server;
/// clients never see the discount math.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub base_price: Decimal,
    pub final_price: Decimal,
    pub on_sale: bool,
    pub rating: Option<Decimal>,
    pub image: Option<String>,
    pub in_stock: bool,
    pub featured: bool,
    pub bestseller: bool,
}

impl From<&Product> for ProductSummary {
    fn from(p: &Product) -> Self {
        let final_price = p.final_price();
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            slug: p.slug.clone(),
            category: p.category.clone(),
            base_price: p.base_price,
            final_price,
            on_sale: final_price < p.base_price,
            rating: p.rating,
            image: p.primary_image().map(|i| i.url.clone()),
            in_stock: p.in_stock(),
            featured: p.featured,
            bestseller: p.bestseller,
        }
    }
}

/// Variant shape on the detail page, with the effective price resolved.
#[derive(Debug, Clone, Serialize)]
pub struct VariantView {
    pub id: String,
    pub label: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub thickness: Option<String>,
    pub price: Decimal,
    pub in_stock: bool,
}

/// Detail page shape.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub summary: ProductSummary,
    pub description: String,
    pub images: Vec<String>,
    pub variants: Vec<VariantView>,
    pub stock: u32,
    pub seo: driftwood_core::catalog::Seo,
}

impl From<&Product> for ProductDetail {
    fn from(p: &Product) -> Self {
        let final_price = p.final_price();
        let variants = p
            .variants
            .iter()
            .map(|v| VariantView {
                id: v.id.to_string(),
                label: v.label(),
                size: v.size.clone(),
                color: v.color.clone(),
                material: v.material.clone(),
                thickness: v.thickness.clone(),
                price: v.effective_price(final_price),
                in_stock: v.stock.map_or(p.stock > 0, |s| s > 0),
            })
            .collect();

        Self {
            summary: ProductSummary::from(p),
            description: p.description.clone(),
            images: p.images.iter().map(|i| i.url.clone()).collect(),
            variants,
            stock: p.stock,
            seo: p.seo.clone(),
        }
    }
}

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub category: Option<String>,
    /// Free-text search term.
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub min_price: Option<Decimal>,
    #[serde(default)]
    pub max_price: Option<Decimal>,
    /// Comma-separated variant sizes.
    #[serde(default)]
    pub sizes: Option<String>,
    #[serde(default)]
    pub min_rating: Option<Decimal>,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub sort: SortKey,
}

impl ListQuery {
    fn into_filter(self) -> (ProductFilter, SortKey) {
        let sizes = self
            .sizes
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        (
            ProductFilter {
                category: self.category,
                query: self.q,
                min_price: self.min_price,
                max_price: self.max_price,
                sizes,
                min_rating: self.min_rating,
                in_stock_only: self.in_stock,
            },
            self.sort,
        )
    }
}

/// Listing response.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub products: Vec<ProductSummary>,
    pub total: usize,
}

/// GET /api/products
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>> {
    let catalog = state.store().products().list_enabled().await?;

    let (filter, sort) = query.into_filter();
    let mut products = filter.apply(&catalog);
    sort_products(&mut products, sort);

    let summaries: Vec<ProductSummary> = products.iter().map(ProductSummary::from).collect();
    let total = summaries.len();

    Ok(Json(ListResponse {
        products: summaries,
        total,
    }))
}

/// GET /api/products/{slug}
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<Json<ProductDetail>> {
    let product = state.store().products().get_by_slug(&slug).await?;

    recent::record_view(&session, &product.id).await?;

    Ok(Json(ProductDetail::from(&product)))
}

/// GET /api/products/{slug}/related
///
/// Same-category products, excluding the product itself.
#[instrument(skip(state))]
pub async fn related(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<ProductSummary>>> {
    let product = state.store().products().get_by_slug(&slug).await?;

    let related: Vec<ProductSummary> = state
        .store()
        .products()
        .list_enabled()
        .await?
        .iter()
        .filter(|p| p.category == product.category && p.id != product.id)
        .take(RELATED_LIMIT)
        .map(ProductSummary::from)
        .collect();

    Ok(Json(related))
}

/// Resolve a product by id from the enabled catalog, for the session-backed
/// views that store bare product ids.
pub async fn lookup_enabled(
    state: &AppState,
    id: &driftwood_core::types::ProductId,
) -> Result<Option<Product>> {
    let product = match state.store().products().get(id).await {
        Ok(p) if p.enabled => Some(p),
        Ok(_) => None,
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(AppError::from(e)),
    };
    Ok(product)
}
