//! Discounts
//!
//! Category discounts are looked up case-insensitively and applied as a proportional
//! reduction of the price handed in. Unknown categories pass through undiscounted.

use std::{fmt, sync::Arc};

use mockall::automock;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::products::Product;

/// Errors specific to discount configuration.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Rate outside of `[0, 1]`.
    #[error("discount rate must be between 0 and 1, got {0}")]
    RateOutOfRange(Decimal),

    /// Category name was empty or only whitespace.
    #[error("discount category cannot be empty")]
    EmptyCategory,
}

/// Applies discounts to product prices.
#[automock]
pub trait DiscountService {
    /// Return `price` after any discount that applies to `product`.
    fn apply_discount(&self, product: &Product, price: Decimal) -> Decimal;
}

impl<T: DiscountService + ?Sized> DiscountService for &T {
    fn apply_discount(&self, product: &Product, price: Decimal) -> Decimal {
        (**self).apply_discount(product, price)
    }
}

impl<T: DiscountService + ?Sized> DiscountService for Box<T> {
    fn apply_discount(&self, product: &Product, price: Decimal) -> Decimal {
        (**self).apply_discount(product, price)
    }
}

impl<T: DiscountService + ?Sized> DiscountService for Arc<T> {
    fn apply_discount(&self, product: &Product, price: Decimal) -> Decimal {
        (**self).apply_discount(product, price)
    }
}

/// A fraction of the price to take off, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiscountRate(Decimal);

impl DiscountRate {
    /// No discount
    pub const NONE: DiscountRate = DiscountRate(Decimal::ZERO);

    /// The rate as a fraction.
    pub fn value(self) -> Decimal {
        self.0
    }

    /// Reduce `price` by this rate.
    pub fn apply(self, price: Decimal) -> Decimal {
        // (1 - rate) is within [0, 1], so the product can't exceed `price`.
        price * (Decimal::ONE - self.0)
    }
}

impl TryFrom<Decimal> for DiscountRate {
    type Error = DiscountError;

    fn try_from(rate: Decimal) -> Result<Self, Self::Error> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(DiscountError::RateOutOfRange(rate));
        }

        Ok(DiscountRate(rate))
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.0 * Decimal::ONE_HUNDRED).normalize())
    }
}

/// Rates seeded by [`CategoryDiscounts::new`], as `(category, rate, scale)`.
const DEFAULT_RATES: [(&str, i64, u32); 4] = [
    ("Electronics", 10, 2),
    ("Clothing", 15, 2),
    ("Books", 5, 2),
    ("Food", 0, 2),
];

/// Per-category discount table.
#[derive(Debug, Clone)]
pub struct CategoryDiscounts {
    rates: FxHashMap<String, DiscountRate>,
}

impl CategoryDiscounts {
    /// Create a table seeded with the default category rates.
    pub fn new() -> Self {
        let rates = DEFAULT_RATES
            .iter()
            .map(|&(category, num, scale)| {
                (category_key(category), DiscountRate(Decimal::new(num, scale)))
            })
            .collect();

        CategoryDiscounts { rates }
    }

    /// Create a table with no categories; every product passes through undiscounted.
    pub fn empty() -> Self {
        CategoryDiscounts {
            rates: FxHashMap::default(),
        }
    }

    /// Insert or overwrite the rate for `category`.
    ///
    /// The table is left untouched when validation fails.
    ///
    /// # Errors
    ///
    /// - [`DiscountError::RateOutOfRange`]: `rate` is below 0 or above 1.
    /// - [`DiscountError::EmptyCategory`]: `category` is empty or whitespace.
    pub fn set_category_discount(
        &mut self,
        category: &str,
        rate: Decimal,
    ) -> Result<(), DiscountError> {
        let rate = DiscountRate::try_from(rate)?;

        if category.trim().is_empty() {
            return Err(DiscountError::EmptyCategory);
        }

        debug!(category, %rate, "set category discount");

        self.rates.insert(category_key(category), rate);

        Ok(())
    }

    /// Look up the rate for `category`, ignoring case.
    pub fn rate_for(&self, category: &str) -> Option<DiscountRate> {
        self.rates.get(&category_key(category)).copied()
    }

    /// Number of categories with a configured rate.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Check if no category has a configured rate.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for CategoryDiscounts {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscountService for CategoryDiscounts {
    fn apply_discount(&self, product: &Product, price: Decimal) -> Decimal {
        self.rate_for(product.category())
            .map_or(price, |rate| rate.apply(price))
    }
}

fn category_key(category: &str) -> String {
    category.to_lowercase()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn product(category: &str) -> Result<Product, crate::products::ProductError> {
        Product::new("Test", Decimal::new(100, 0), category)
    }

    #[test]
    fn default_rates_are_seeded() -> TestResult {
        let discounts = CategoryDiscounts::new();

        assert_eq!(discounts.len(), 4);
        assert_eq!(
            discounts.apply_discount(&product("Electronics")?, Decimal::new(1000, 0)),
            Decimal::new(900, 0)
        );
        assert_eq!(
            discounts.apply_discount(&product("Clothing")?, Decimal::new(100, 0)),
            Decimal::new(85, 0)
        );
        assert_eq!(
            discounts.apply_discount(&product("Books")?, Decimal::new(50, 0)),
            Decimal::new(47_50, 2)
        );
        assert_eq!(
            discounts.apply_discount(&product("Food")?, Decimal::new(5, 0)),
            Decimal::new(5, 0)
        );

        Ok(())
    }

    #[test]
    fn unknown_category_is_not_discounted() -> TestResult {
        let discounts = CategoryDiscounts::new();
        let price = Decimal::new(100, 0);

        assert_eq!(discounts.apply_discount(&product("Toys")?, price), price);

        Ok(())
    }

    #[test]
    fn electronics_discount_is_exact_at_price_extremes() -> TestResult {
        let discounts = CategoryDiscounts::new();
        let laptop = product("Electronics")?;

        let cases = [
            (Decimal::new(1, 2), Decimal::new(9, 3)),
            (Decimal::new(10_000, 0), Decimal::new(9_000, 0)),
            (Decimal::new(999_99, 2), Decimal::new(899_991, 3)),
        ];

        for (price, expected) in cases {
            assert_eq!(
                discounts.apply_discount(&laptop, price),
                expected,
                "discounting {price}"
            );
        }

        Ok(())
    }

    #[test]
    fn category_lookup_ignores_case() -> TestResult {
        let discounts = CategoryDiscounts::new();
        let price = Decimal::new(100, 0);

        for category in ["Electronics", "electronics", "ELECTRONICS"] {
            assert_eq!(
                discounts.apply_discount(&product(category)?, price),
                Decimal::new(90, 0),
                "category {category}"
            );
        }

        Ok(())
    }

    #[test]
    fn set_category_discount_overwrites_existing_rate() -> TestResult {
        let mut discounts = CategoryDiscounts::new();

        discounts.set_category_discount("electronics", Decimal::new(25, 2))?;

        assert_eq!(discounts.len(), 4);
        assert_eq!(
            discounts.apply_discount(&product("Electronics")?, Decimal::new(100, 0)),
            Decimal::new(75, 0)
        );

        Ok(())
    }

    #[test]
    fn set_category_discount_adds_new_category() -> TestResult {
        let mut discounts = CategoryDiscounts::new();

        discounts.set_category_discount("Toys", Decimal::new(20, 2))?;

        assert_eq!(
            discounts.rate_for("TOYS").map(DiscountRate::value),
            Some(Decimal::new(20, 2))
        );

        Ok(())
    }

    #[test]
    fn set_category_discount_accepts_inclusive_bounds() -> TestResult {
        let mut discounts = CategoryDiscounts::empty();
        let test = product("Test")?;

        for rate in [Decimal::ZERO, Decimal::ONE, Decimal::new(5, 1)] {
            discounts.set_category_discount("Test", rate)?;

            assert_eq!(
                discounts.apply_discount(&test, Decimal::new(100, 0)),
                Decimal::new(100, 0) * (Decimal::ONE - rate),
                "rate {rate}"
            );
        }

        Ok(())
    }

    #[test]
    fn set_category_discount_rejects_out_of_range_and_keeps_prior_rate() {
        let mut discounts = CategoryDiscounts::new();

        for rate in [
            Decimal::new(-1, 1),
            Decimal::new(11, 1),
            Decimal::NEGATIVE_ONE,
            Decimal::TWO,
        ] {
            let result = discounts.set_category_discount("Electronics", rate);

            assert_eq!(result, Err(DiscountError::RateOutOfRange(rate)));
        }

        assert_eq!(
            discounts.rate_for("Electronics").map(DiscountRate::value),
            Some(Decimal::new(10, 2))
        );
    }

    #[test]
    fn out_of_range_message_mentions_discount_rate() {
        let message = DiscountError::RateOutOfRange(Decimal::TWO).to_string();

        assert!(message.contains("discount rate"));
    }

    #[test]
    fn set_category_discount_rejects_blank_category() {
        let mut discounts = CategoryDiscounts::empty();

        assert_eq!(
            discounts.set_category_discount("  ", Decimal::new(1, 1)),
            Err(DiscountError::EmptyCategory)
        );
        assert!(discounts.is_empty());
    }

    #[test]
    fn empty_table_discounts_nothing() -> TestResult {
        let discounts = CategoryDiscounts::empty();
        let price = Decimal::new(1500, 0);

        assert_eq!(discounts.apply_discount(&product("Electronics")?, price), price);

        Ok(())
    }

    #[test]
    fn rate_displays_as_percentage() -> TestResult {
        let rate = DiscountRate::try_from(Decimal::new(15, 2))?;

        assert_eq!(rate.to_string(), "15%");
        assert_eq!(DiscountRate::NONE.to_string(), "0%");

        Ok(())
    }

    #[test]
    fn blanket_impls_forward_to_inner_service() -> TestResult {
        let discounts = CategoryDiscounts::new();
        let laptop = product("Electronics")?;
        let price = Decimal::new(100, 0);

        let borrowed: &dyn DiscountService = &discounts;
        let boxed: Box<dyn DiscountService> = Box::new(discounts.clone());
        let shared = Arc::new(discounts.clone());

        assert_eq!(borrowed.apply_discount(&laptop, price), Decimal::new(90, 0));
        assert_eq!(boxed.apply_discount(&laptop, price), Decimal::new(90, 0));
        assert_eq!(shared.apply_discount(&laptop, price), Decimal::new(90, 0));

        Ok(())
    }
}
