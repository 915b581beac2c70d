//! Products

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when a product fails validation.
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    /// Name was empty or only whitespace.
    #[error("product name cannot be empty")]
    EmptyName,

    /// Price was below zero.
    #[error("price cannot be negative, got {0}")]
    NegativePrice(Decimal),

    /// Category was empty or only whitespace.
    #[error("product category cannot be empty")]
    EmptyCategory,
}

/// Product
///
/// An immutable, sellable item. Two products with the same name, price and category
/// are interchangeable, which is what lets a cart merge repeat adds into one line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Product {
    name: String,
    price: Decimal,
    category: String,
}

impl Product {
    /// Create a new product.
    ///
    /// # Errors
    ///
    /// - [`ProductError::EmptyName`]: `name` is empty or whitespace.
    /// - [`ProductError::NegativePrice`]: `price` is below zero.
    /// - [`ProductError::EmptyCategory`]: `category` is empty or whitespace.
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
    ) -> Result<Self, ProductError> {
        let name = name.into();
        let category = category.into();

        if name.trim().is_empty() {
            return Err(ProductError::EmptyName);
        }

        if price < Decimal::ZERO {
            return Err(ProductError::NegativePrice(price));
        }

        if category.trim().is_empty() {
            return Err(ProductError::EmptyCategory);
        }

        Ok(Product {
            name,
            price,
            category,
        })
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Product category, as given at construction.
    pub fn category(&self) -> &str {
        &self.category
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) @ {}", self.name, self.category, self.price)
    }
}
