//! In-memory product filtering and sorting.
//!
//! Filtering is a sequence of independent predicate passes over the full
//! product list; sorting is a single comparator switch. The list is rescanned
//! on every call - there is no pagination, indexing, or incremental
//! recomputation, matching the size of catalog this serves.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

/// Filter state for a product listing view.
///
/// All fields are optional; an empty filter passes every product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Category slug, matched exactly.
    #[serde(default)]
    pub category: Option<String>,
    /// Free-text query, case-insensitive substring match on name and
    /// description.
    #[serde(default)]
    pub query: Option<String>,
    /// Inclusive lower bound on the finalized price.
    #[serde(default)]
    pub min_price: Option<Decimal>,
    /// Inclusive upper bound on the finalized price.
    #[serde(default)]
    pub max_price: Option<Decimal>,
    /// Variant sizes; a product matches if any variant size is in the set.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Minimum average rating.
    #[serde(default)]
    pub min_rating: Option<Decimal>,
    /// Keep only products with stock.
    #[serde(default)]
    pub in_stock_only: bool,
}

impl ProductFilter {
    /// Whether a single product passes every configured predicate.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && product.category != *category
        {
            return false;
        }

        if let Some(query) = &self.query {
            let needle = query.to_lowercase();
            if !needle.is_empty()
                && !product.name.to_lowercase().contains(&needle)
                && !product.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        let price = product.final_price();
        if let Some(min) = self.min_price
            && price < min
        {
            return false;
        }
        if let Some(max) = self.max_price
            && price > max
        {
            return false;
        }

        if !self.sizes.is_empty() {
            let has_size = product.variants.iter().any(|v| {
                v.size
                    .as_ref()
                    .is_some_and(|s| self.sizes.iter().any(|wanted| wanted == s))
            });
            if !has_size {
                return false;
            }
        }

        if let Some(min_rating) = self.min_rating
            && !product.rating.is_some_and(|r| r >= min_rating)
        {
            return false;
        }

        if self.in_stock_only && !product.in_stock() {
            return false;
        }

        true
    }

    /// Apply the filter to a product list, preserving input order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }
}

/// Sort a product list in place by the given key.
///
/// Name comparison is case-insensitive; price comparison is numeric over the
/// finalized price. The sort is stable, so ties keep their input order.
pub fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::NameAsc => {
            products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        SortKey::NameDesc => {
            products.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()));
        }
        SortKey::PriceAsc => {
            products.sort_by(|a, b| a.final_price().cmp(&b.final_price()));
        }
        SortKey::PriceDesc => {
            products.sort_by(|a, b| b.final_price().cmp(&a.final_price()));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;
    use crate::catalog::Variant;
    use crate::pricing::Discount;
    use crate::types::{ProductId, VariantId};

    fn product(id: &str, name: &str, category: &str, base: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            slug: name.to_lowercase().replace(' ', "-"),
            description: String::new(),
            base_price: base,
            discount: None,
            category: category.to_owned(),
            stock: 3,
            rating: None,
            images: Vec::new(),
            primary_image: 0,
            variants: Vec::new(),
            enabled: true,
            featured: false,
            bestseller: false,
            seo: crate::catalog::Seo::default(),
            created_at: None,
            updated_at: None,
        }
    }

    fn catalog() -> Vec<Product> {
        let mut alder = product("p1", "Alder Bench", "furniture", dec!(240));
        alder.description = "Solid alder hallway bench.".to_owned();
        alder.rating = Some(dec!(4.8));

        let mut rug = product("p2", "Juniper Rug", "rugs", dec!(180));
        rug.discount = Some(Discount::percentage(dec!(50)));
        rug.variants = vec![Variant {
            id: VariantId::new("v1"),
            size: Some("Large".to_owned()),
            color: None,
            material: None,
            thickness: None,
            price: None,
            stock: None,
        }];
        rug.rating = Some(dec!(3.9));

        let mut lamp = product("p3", "birch lamp", "lighting", dec!(65));
        lamp.stock = 0;

        vec![alder, rug, lamp]
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let products = catalog();
        assert_eq!(ProductFilter::default().apply(&products).len(), 3);
    }

    #[test]
    fn test_category_filter() {
        let products = catalog();
        let filter = ProductFilter {
            category: Some("rugs".to_owned()),
            ..ProductFilter::default()
        };
        let matched = filter.apply(&products);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().unwrap().name, "Juniper Rug");
    }

    #[test]
    fn test_absent_category_yields_empty() {
        let products = catalog();
        let filter = ProductFilter {
            category: Some("no-such-category".to_owned()),
            ..ProductFilter::default()
        };
        assert!(filter.apply(&products).is_empty());
    }

    #[test]
    fn test_query_is_case_insensitive_over_name_and_description() {
        let products = catalog();

        let by_name = ProductFilter {
            query: Some("BIRCH".to_owned()),
            ..ProductFilter::default()
        };
        assert_eq!(by_name.apply(&products).len(), 1);

        let by_description = ProductFilter {
            query: Some("hallway".to_owned()),
            ..ProductFilter::default()
        };
        assert_eq!(by_description.apply(&products).len(), 1);
    }

    #[test]
    fn test_price_range_uses_finalized_price() {
        let products = catalog();
        // The rug's base is 180 but its finalized price is 90.
        let filter = ProductFilter {
            min_price: Some(dec!(80)),
            max_price: Some(dec!(100)),
            ..ProductFilter::default()
        };
        let matched = filter.apply(&products);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().unwrap().id, ProductId::new("p2"));
    }

    #[test]
    fn test_size_membership() {
        let products = catalog();
        let filter = ProductFilter {
            sizes: vec!["Large".to_owned(), "Small".to_owned()],
            ..ProductFilter::default()
        };
        let matched = filter.apply(&products);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().unwrap().id, ProductId::new("p2"));
    }

    #[test]
    fn test_min_rating_excludes_unrated() {
        let products = catalog();
        let filter = ProductFilter {
            min_rating: Some(dec!(4.0)),
            ..ProductFilter::default()
        };
        let matched = filter.apply(&products);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().unwrap().id, ProductId::new("p1"));
    }

    #[test]
    fn test_in_stock_only() {
        let products = catalog();
        let filter = ProductFilter {
            in_stock_only: true,
            ..ProductFilter::default()
        };
        let matched = filter.apply(&products);
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|p| p.id != ProductId::new("p3")));
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let mut products = catalog();
        sort_products(&mut products, SortKey::NameAsc);
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alder Bench", "birch lamp", "Juniper Rug"]);
    }

    #[test]
    fn test_price_sorts_are_exact_reversals_without_ties() {
        let mut asc = catalog();
        sort_products(&mut asc, SortKey::PriceAsc);

        let mut desc = catalog();
        sort_products(&mut desc, SortKey::PriceDesc);

        let reversed: Vec<_> = desc.into_iter().rev().collect();
        assert_eq!(asc, reversed);
    }

    #[test]
    fn test_price_sort_uses_finalized_price() {
        let mut products = catalog();
        sort_products(&mut products, SortKey::PriceAsc);
        // lamp 65, rug 90 (discounted from 180), bench 240
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p3", "p2", "p1"]);
    }
}
