//! End-to-end pricing, filtering, and order-total behavior, exercised
//! through the public core APIs the way the servers use them.

#![allow(clippy::unwrap_used)]

use rust_decimal::{Decimal, dec};

use driftwood_core::catalog::{Product, Seo, Variant};
use driftwood_core::filter::{ProductFilter, SortKey, sort_products};
use driftwood_core::orders::{Address, CustomerSnapshot, Order, OrderItem};
use driftwood_core::pricing::{Discount, final_price};
use driftwood_core::types::{Email, OrderId, ProductId, VariantId};

fn product(name: &str, base: Decimal, discount: Option<Discount>) -> Product {
    Product {
        id: ProductId::new(format!("prod_{}", name.to_lowercase().replace(' ', "_"))),
        name: name.to_owned(),
        slug: name.to_lowercase().replace(' ', "-"),
        description: String::new(),
        base_price: base,
        discount,
        category: "rugs".to_owned(),
        stock: 5,
        rating: Some(dec!(4.0)),
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

// ============================================================================
// Discount resolution
// ============================================================================

#[test]
fn test_percentage_discount_on_listing_price() {
    // A 1000 product at 20% off lists at 800.
    let p = product("Juniper Rug", dec!(1000), Some(Discount::percentage(dec!(20))));
    assert_eq!(p.final_price(), dec!(800));
}

#[test]
fn test_flat_discount_larger_than_base_is_free_not_negative() {
    // A 500 product with a 600 flat discount charges zero.
    let p = product("Tide Candle", dec!(500), Some(Discount::flat(dec!(600))));
    assert_eq!(p.final_price(), Decimal::ZERO);
    assert!(p.final_price() >= Decimal::ZERO);
}

#[test]
fn test_discount_never_negative_across_grid() {
    let bases = [dec!(0), dec!(0.01), dec!(49.99), dec!(500), dec!(9999)];
    let discounts = [
        None,
        Some(Discount::percentage(dec!(0))),
        Some(Discount::percentage(dec!(50))),
        Some(Discount::percentage(dec!(100))),
        Some(Discount::flat(dec!(10))),
        Some(Discount::flat(dec!(10000))),
    ];

    for base in bases {
        for discount in &discounts {
            let resolved = final_price(base, discount.as_ref());
            assert!(resolved >= Decimal::ZERO, "{base} with {discount:?} went negative");
            assert!(resolved <= base, "{base} with {discount:?} increased");
        }
    }
}

#[test]
fn test_variant_override_bypasses_discount() {
    let mut p = product("Shore Duvet", dec!(200), Some(Discount::percentage(dec!(50))));
    p.variants = vec![Variant {
        id: VariantId::new("var_king"),
        size: Some("King".to_owned()),
        color: None,
        material: None,
        thickness: None,
        price: Some(dec!(240)),
        stock: None,
    }];

    // Product-level price is discounted; the variant's own price is not.
    assert_eq!(p.price_for_variant(None), dec!(100));
    assert_eq!(p.price_for_variant(Some(&VariantId::new("var_king"))), dec!(240));
}

// ============================================================================
// Filtering and sorting
// ============================================================================

fn catalog() -> Vec<Product> {
    let mut a = product("Alder Bench", dec!(240), None);
    a.category = "furniture".to_owned();
    a.rating = Some(dec!(4.9));

    let mut b = product("Juniper Rug", dec!(1000), Some(Discount::percentage(dec!(20))));
    b.rating = Some(dec!(4.7));

    let mut c = product("Birch Table", dec!(129), None);
    c.category = "furniture".to_owned();
    c.rating = Some(dec!(4.2));
    c.stock = 0;

    vec![a, b, c]
}

#[test]
fn test_price_filter_uses_finalized_price() {
    let filter = ProductFilter {
        max_price: Some(dec!(800)),
        ..Default::default()
    };
    let matched = filter.apply(&catalog());

    // The rug's base price is 1000, but 20% off brings it to 800 inclusive.
    assert!(matched.iter().any(|p| p.name == "Juniper Rug"));
    assert_eq!(matched.len(), 3);

    let filter = ProductFilter {
        max_price: Some(dec!(799)),
        ..Default::default()
    };
    assert!(!filter.apply(&catalog()).iter().any(|p| p.name == "Juniper Rug"));
}

#[test]
fn test_filters_compose_conjunctively() {
    let filter = ProductFilter {
        category: Some("furniture".to_owned()),
        in_stock_only: true,
        ..Default::default()
    };
    let matched = filter.apply(&catalog());

    assert_eq!(matched.len(), 1);
    assert_eq!(matched.first().unwrap().name, "Alder Bench");
}

#[test]
fn test_sort_by_price_uses_finalized_price() {
    let mut products = catalog();
    sort_products(&mut products, SortKey::PriceAsc);

    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    // 129, 240, 800 (after discount)
    assert_eq!(names, vec!["Birch Table", "Alder Bench", "Juniper Rug"]);
}

#[test]
fn test_sort_stability_on_ties() {
    let mut products = vec![
        product("B Same Price", dec!(100), None),
        product("A Same Price", dec!(100), None),
    ];
    sort_products(&mut products, SortKey::PriceAsc);

    // Equal prices keep their input order.
    assert_eq!(products.first().unwrap().name, "B Same Price");
}

// ============================================================================
// Order totals
// ============================================================================

#[test]
fn test_order_total_matches_line_sums() {
    let order = Order {
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
                quantity: 2,
                unit_price: dec!(240),
            },
            OrderItem {
                product_id: ProductId::new("p2"),
                variant_id: Some(VariantId::new("v1")),
                name: "Tide Candle".to_owned(),
                quantity: 3,
                unit_price: dec!(28),
            },
        ],
        total_amount: dec!(564),
        order_status: driftwood_core::types::OrderStatus::Pending,
        payment_status: driftwood_core::types::PaymentStatus::Unpaid,
        created_at: None,
        updated_at: None,
    };

    assert_eq!(order.computed_total(), order.total_amount);
    assert_eq!(order.item_count(), 5);
}
