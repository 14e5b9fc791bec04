//! Order records mirrored from the `orders` collection.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Email, OrderId, OrderStatus, PaymentStatus, ProductId, VariantId};

/// Shipping address captured at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
}

/// Customer details snapshotted onto the order at checkout time, so later
/// profile edits do not rewrite order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub phone: Option<String>,
    pub address: Address,
}

/// A single order line.
///
/// `unit_price` is the resolved price at purchase time (variant override or
/// finalized product price), not a reference to the live product document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderItem {
    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// An order document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: CustomerSnapshot,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    #[serde(default)]
    pub order_status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Sum of line totals.
    ///
    /// `total_amount` is stored on the document for display; this recomputes
    /// it from the items for validation.
    #[must_use]
    pub fn computed_total(&self) -> Decimal {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    fn order() -> Order {
        Order {
            id: OrderId::new("ord_1"),
            customer: CustomerSnapshot {
                name: "Mara Ellis".to_owned(),
                email: Email::parse("mara@example.com").unwrap(),
                phone: None,
                address: Address {
                    line1: "12 Shore Rd".to_owned(),
                    line2: None,
                    city: "Portree".to_owned(),
                    state: None,
                    postal_code: "IV51 9ES".to_owned(),
                    country: "GB".to_owned(),
                },
            },
            items: vec![
                OrderItem {
                    product_id: ProductId::new("p1"),
                    variant_id: None,
                    name: "Alder Bench".to_owned(),
                    quantity: 1,
                    unit_price: dec!(240),
                },
                OrderItem {
                    product_id: ProductId::new("p2"),
                    variant_id: Some(VariantId::new("v1")),
                    name: "Juniper Rug".to_owned(),
                    quantity: 2,
                    unit_price: dec!(90),
                },
            ],
            total_amount: dec!(420),
            order_status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_line_total() {
        let o = order();
        assert_eq!(o.items.get(1).unwrap().line_total(), dec!(180));
    }

    #[test]
    fn test_computed_total_matches_stored() {
        let o = order();
        assert_eq!(o.computed_total(), o.total_amount);
    }

    #[test]
    fn test_item_count() {
        assert_eq!(order().item_count(), 3);
    }
}
