//! Session-backed cart model.
//!
//! A cart is a plain array of lines stored in the session. Unit prices are
//! resolved server-side at add time (variant override or finalized product
//! price) and re-used for totals; the checkout snapshot carries them onto
//! the order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use driftwood_core::types::{ProductId, VariantId};

/// One cart line as stored in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    pub name: String,
    /// Variant label ("Queen / Oat"), if a variant was selected.
    #[serde(default)]
    pub variant_label: Option<String>,
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
}

impl CartLine {
    /// Whether another line refers to the same product+variant selection.
    #[must_use]
    pub fn same_selection(&self, product_id: &ProductId, variant_id: Option<&VariantId>) -> bool {
        &self.product_id == product_id && self.variant_id.as_ref() == variant_id
    }

    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Cart response shape.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub subtotal: Decimal,
    pub item_count: u32,
}

impl CartView {
    /// Build the response shape from the stored lines.
    #[must_use]
    pub fn from_lines(items: Vec<CartLine>) -> Self {
        let subtotal = items.iter().map(CartLine::line_total).sum();
        let item_count = items.iter().map(|l| l.quantity).sum();
        Self {
            items,
            subtotal,
            item_count,
        }
    }

    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_lines(Vec::new())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    fn line(product: &str, variant: Option<&str>, price: Decimal, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(product),
            variant_id: variant.map(VariantId::new),
            name: product.to_owned(),
            variant_label: None,
            unit_price: price,
            quantity,
            image: None,
        }
    }

    #[test]
    fn test_same_selection_distinguishes_variants() {
        let l = line("p1", Some("v1"), dec!(10), 1);
        assert!(l.same_selection(&ProductId::new("p1"), Some(&VariantId::new("v1"))));
        assert!(!l.same_selection(&ProductId::new("p1"), Some(&VariantId::new("v2"))));
        assert!(!l.same_selection(&ProductId::new("p1"), None));
    }

    #[test]
    fn test_view_totals() {
        let view = CartView::from_lines(vec![
            line("p1", None, dec!(240), 1),
            line("p2", Some("v1"), dec!(90), 2),
        ]);
        assert_eq!(view.subtotal, dec!(420));
        assert_eq!(view.item_count, 3);
    }

    #[test]
    fn test_empty_cart() {
        let view = CartView::empty();
        assert_eq!(view.subtotal, Decimal::ZERO);
        assert_eq!(view.item_count, 0);
    }
}
