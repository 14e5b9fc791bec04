//! Product, variant, and image records mirrored from the `products`
//! collection of the hosted document store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::{Discount, final_price};
use crate::types::{ProductId, VariantId};

/// SEO metadata stored alongside products and blog posts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A product image URL. The owning product records which image is primary
/// via `primary_image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// A product sub-option (size/color/material/thickness) optionally
/// overriding price and stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub thickness: Option<String>,
    /// Per-variant price override. When set, this is the price used for
    /// display and cart purposes instead of the product's finalized price.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Per-variant stock override.
    #[serde(default)]
    pub stock: Option<u32>,
}

impl Variant {
    /// The price charged when this variant is selected: the variant's own
    /// price if it defines one, otherwise the product-level finalized price.
    #[must_use]
    pub fn effective_price(&self, product_final: Decimal) -> Decimal {
        self.price.unwrap_or(product_final)
    }

    /// Human-readable label built from the populated option axes.
    #[must_use]
    pub fn label(&self) -> String {
        let parts: Vec<&str> = [
            self.size.as_deref(),
            self.color.as_deref(),
            self.material.as_deref(),
            self.thickness.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            "Default".to_owned()
        } else {
            parts.join(" / ")
        }
    }
}

/// A product document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub base_price: Decimal,
    #[serde(default)]
    pub discount: Option<Discount>,
    /// Category slug (e.g. `"rugs"`), matched exactly when filtering.
    pub category: String,
    #[serde(default)]
    pub stock: u32,
    /// Average review rating, 0-5.
    #[serde(default)]
    pub rating: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    /// Index into `images` of the primary image.
    #[serde(default)]
    pub primary_image: usize,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub bestseller: bool,
    #[serde(default)]
    pub seo: Seo,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

const fn default_true() -> bool {
    true
}

impl Product {
    /// The finalized (displayed/charged) price after discount resolution.
    #[must_use]
    pub fn final_price(&self) -> Decimal {
        final_price(self.base_price, self.discount.as_ref())
    }

    /// The price charged for a given variant selection, falling back to the
    /// product-level finalized price when the variant is unknown or defines
    /// no override.
    #[must_use]
    pub fn price_for_variant(&self, variant_id: Option<&VariantId>) -> Decimal {
        let product_final = self.final_price();
        variant_id
            .and_then(|id| self.variants.iter().find(|v| &v.id == id))
            .map_or(product_final, |v| v.effective_price(product_final))
    }

    /// Find a variant by ID.
    #[must_use]
    pub fn variant(&self, variant_id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| &v.id == variant_id)
    }

    /// Stock available for a variant selection, falling back to product
    /// stock when the variant defines no override.
    #[must_use]
    pub fn stock_for_variant(&self, variant_id: Option<&VariantId>) -> u32 {
        variant_id
            .and_then(|id| self.variant(id))
            .and_then(|v| v.stock)
            .unwrap_or(self.stock)
    }

    /// The primary image, if any. Falls back to the first image when the
    /// recorded index is out of range.
    #[must_use]
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images.get(self.primary_image).or_else(|| self.images.first())
    }

    /// Whether the product (or any of its variants) has stock.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0 || self.variants.iter().any(|v| v.stock.is_some_and(|s| s > 0))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;
    use crate::pricing::Discount;

    fn product(base: Decimal, discount: Option<Discount>) -> Product {
        Product {
            id: ProductId::new("prod_1"),
            name: "Juniper Wool Rug".to_owned(),
            slug: "juniper-wool-rug".to_owned(),
            description: "Hand-loomed wool rug.".to_owned(),
            base_price: base,
            discount,
            category: "rugs".to_owned(),
            stock: 4,
            rating: Some(dec!(4.5)),
            images: vec![
                ProductImage {
                    url: "https://cdn.example.com/rug-front.jpg".to_owned(),
                    alt: None,
                },
                ProductImage {
                    url: "https://cdn.example.com/rug-detail.jpg".to_owned(),
                    alt: Some("corner detail".to_owned()),
                },
            ],
            primary_image: 1,
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
    fn test_final_price_percentage() {
        let p = product(dec!(1000), Some(Discount::percentage(dec!(20))));
        assert_eq!(p.final_price(), dec!(800));
    }

    #[test]
    fn test_final_price_flat_clamped() {
        let p = product(dec!(500), Some(Discount::flat(dec!(600))));
        assert_eq!(p.final_price(), Decimal::ZERO);
    }

    #[test]
    fn test_variant_price_override() {
        let mut p = product(dec!(100), Some(Discount::percentage(dec!(10))));
        p.variants = vec![
            Variant {
                id: VariantId::new("var_a"),
                size: Some("Large".to_owned()),
                color: None,
                material: None,
                thickness: None,
                price: Some(dec!(150)),
                stock: Some(2),
            },
            Variant {
                id: VariantId::new("var_b"),
                size: Some("Small".to_owned()),
                color: None,
                material: None,
                thickness: None,
                price: None,
                stock: None,
            },
        ];

        // Variant with its own price overrides the discounted product price.
        assert_eq!(
            p.price_for_variant(Some(&VariantId::new("var_a"))),
            dec!(150)
        );
        // Variant without an override inherits the finalized price.
        assert_eq!(
            p.price_for_variant(Some(&VariantId::new("var_b"))),
            dec!(90)
        );
        // Unknown variant falls back to the finalized price.
        assert_eq!(
            p.price_for_variant(Some(&VariantId::new("var_zzz"))),
            dec!(90)
        );
        assert_eq!(p.price_for_variant(None), dec!(90));
    }

    #[test]
    fn test_stock_for_variant() {
        let mut p = product(dec!(10), None);
        p.variants = vec![Variant {
            id: VariantId::new("var_a"),
            size: None,
            color: None,
            material: None,
            thickness: None,
            price: None,
            stock: Some(0),
        }];

        assert_eq!(p.stock_for_variant(Some(&VariantId::new("var_a"))), 0);
        assert_eq!(p.stock_for_variant(None), 4);
    }

    #[test]
    fn test_primary_image_fallback() {
        let mut p = product(dec!(10), None);
        assert_eq!(
            p.primary_image().unwrap().url,
            "https://cdn.example.com/rug-detail.jpg"
        );

        p.primary_image = 99;
        assert_eq!(
            p.primary_image().unwrap().url,
            "https://cdn.example.com/rug-front.jpg"
        );
    }

    #[test]
    fn test_variant_label() {
        let v = Variant {
            id: VariantId::new("var_a"),
            size: Some("Queen".to_owned()),
            color: Some("Oat".to_owned()),
            material: None,
            thickness: Some("10cm".to_owned()),
            price: None,
            stock: None,
        };
        assert_eq!(v.label(), "Queen / Oat / 10cm");

        let bare = Variant {
            id: VariantId::new("var_b"),
            size: None,
            color: None,
            material: None,
            thickness: None,
            price: None,
            stock: None,
        };
        assert_eq!(bare.label(), "Default");
    }

    #[test]
    fn test_document_deserialization_defaults() {
        // Documents written by older clients omit most optional fields.
        let p: Product = serde_json::from_str(
            r#"{
                "id": "prod_9",
                "name": "Birch Side Table",
                "slug": "birch-side-table",
                "base_price": "129.00",
                "category": "furniture"
            }"#,
        )
        .unwrap();

        assert!(p.enabled);
        assert!(!p.featured);
        assert!(p.variants.is_empty());
        assert_eq!(p.final_price(), dec!(129.00));
    }
}
