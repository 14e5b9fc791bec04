//! Discount and final-price resolution.
//!
//! A product carries a base price and an optional discount descriptor. The
//! displayed/charged price ("finalized price") is the base price adjusted by
//! the discount, floored at zero. A variant that defines its own price
//! overrides the product-level finalized price (see
//! [`crate::catalog::Variant::effective_price`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// `value` is a percentage of the base price, expected in `0..=100`.
    Percentage,
    /// `value` is an absolute amount subtracted from the base price.
    Flat,
}

/// A discount descriptor attached to a product document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    /// Interpretation of `value`.
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    /// Discount magnitude; non-positive values are ignored.
    pub value: Decimal,
}

impl Discount {
    /// Create a percentage discount.
    #[must_use]
    pub const fn percentage(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Percentage,
            value,
        }
    }

    /// Create a flat discount.
    #[must_use]
    pub const fn flat(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Flat,
            value,
        }
    }
}

/// Resolve the finalized price from a base price and an optional discount.
///
/// A discount applies only when present with a value greater than zero:
/// percentage computes `base * (1 - value/100)`, flat computes
/// `base - value`. The result is floored at zero, so a flat discount
/// exceeding the base price yields a free item rather than a negative
/// charge.
#[must_use]
pub fn final_price(base: Decimal, discount: Option<&Discount>) -> Decimal {
    let price = match discount {
        Some(d) if d.value > Decimal::ZERO => match d.kind {
            DiscountKind::Percentage => {
                base * (Decimal::ONE - d.value / Decimal::ONE_HUNDRED)
            }
            DiscountKind::Flat => base - d.value,
        },
        _ => base,
    };

    price.max(Decimal::ZERO)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_no_discount_returns_base() {
        assert_eq!(final_price(dec!(49.99), None), dec!(49.99));
    }

    #[test]
    fn test_zero_value_discount_ignored() {
        let d = Discount::percentage(Decimal::ZERO);
        assert_eq!(final_price(dec!(100), Some(&d)), dec!(100));

        let d = Discount::flat(dec!(-5));
        assert_eq!(final_price(dec!(100), Some(&d)), dec!(100));
    }

    #[test]
    fn test_percentage_discount() {
        // base 1000, 20% off => 800
        let d = Discount::percentage(dec!(20));
        assert_eq!(final_price(dec!(1000), Some(&d)), dec!(800));
    }

    #[test]
    fn test_percentage_never_exceeds_base() {
        let bases = [dec!(0.01), dec!(19.99), dec!(250), dec!(9999.99)];
        let values = [dec!(0.5), dec!(10), dec!(33.3), dec!(99), dec!(100)];

        for base in bases {
            for value in values {
                let d = Discount::percentage(value);
                let resolved = final_price(base, Some(&d));
                assert!(
                    resolved <= base,
                    "pct {value} raised {base} to {resolved}"
                );
                assert!(resolved >= Decimal::ZERO);
                assert_eq!(
                    resolved,
                    base * (Decimal::ONE - value / Decimal::ONE_HUNDRED)
                );
            }
        }
    }

    #[test]
    fn test_flat_discount() {
        let d = Discount::flat(dec!(15));
        assert_eq!(final_price(dec!(49.99), Some(&d)), dec!(34.99));
    }

    #[test]
    fn test_flat_discount_clamped_at_zero() {
        // base 500, flat 600 would historically have charged -100; the
        // finalized price is floored at zero instead.
        let d = Discount::flat(dec!(600));
        assert_eq!(final_price(dec!(500), Some(&d)), Decimal::ZERO);

        let d = Discount::flat(dec!(500));
        assert_eq!(final_price(dec!(500), Some(&d)), Decimal::ZERO);
    }

    #[test]
    fn test_flat_discount_below_base_exact() {
        let bases = [dec!(10), dec!(100), dec!(500)];
        for base in bases {
            for value in [dec!(0.01), dec!(1), dec!(9.99)] {
                let d = Discount::flat(value);
                let resolved = final_price(base, Some(&d));
                assert_eq!(resolved, base - value);
                assert!(resolved >= Decimal::ZERO);
            }
        }
    }

    #[test]
    fn test_discount_serde_shape() {
        // Wire format matches the stored document shape:
        // {"type": "percentage", "value": "20"}
        let d: Discount =
            serde_json::from_str(r#"{"type":"percentage","value":"20"}"#).unwrap();
        assert_eq!(d.kind, DiscountKind::Percentage);
        assert_eq!(d.value, dec!(20));
    }
}
