//! Cart

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    discounts::DiscountService,
    pricing::{TotalPriceError, total_price},
    products::Product,
};

/// Errors related to cart mutation.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A quantity of zero was passed to add or remove.
    #[error("quantity must be positive")]
    ZeroQuantity,

    /// Adding would push a line's quantity past `u32::MAX` (product name).
    #[error("quantity of {0} would exceed the maximum line quantity")]
    QuantityOverflow(String),

    /// No line item matches the product (product name).
    #[error("product {0} not found in cart")]
    ProductNotFound(String),
}

/// A product's presence in a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    product: Product,
    quantity: u32,
}

impl CartItem {
    pub(crate) fn new(product: Product, quantity: u32) -> Self {
        CartItem { product, quantity }
    }

    /// The product on this line.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// How many units of the product are in the cart. Always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Cart
///
/// Line items are kept in the order their product was first added, with at most one line
/// per distinct product.
#[derive(Debug)]
pub struct Cart<D: DiscountService> {
    items: Vec<CartItem>,
    discounts: D,
}

impl<D: DiscountService> Cart<D> {
    /// Create an empty cart priced by the given discount service.
    pub fn new(discounts: D) -> Self {
        Cart {
            items: Vec::new(),
            discounts,
        }
    }

    /// Add `quantity` units of `product`, merging with an existing line for an equal product.
    ///
    /// # Errors
    ///
    /// - [`CartError::ZeroQuantity`]: `quantity` is zero.
    /// - [`CartError::QuantityOverflow`]: the merged quantity would not fit in a `u32`.
    pub fn add_product(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product == *product) {
            item.quantity = item
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| CartError::QuantityOverflow(product.name().to_string()))?;

            debug!(product = product.name(), quantity = item.quantity, "increased line quantity");
        } else {
            self.items.push(CartItem::new(product.clone(), quantity));

            debug!(product = product.name(), quantity, "added line");
        }

        Ok(())
    }

    /// Remove `quantity` units of `product`.
    ///
    /// Removing at least as many units as the line holds drops the line entirely.
    ///
    /// # Errors
    ///
    /// - [`CartError::ZeroQuantity`]: `quantity` is zero.
    /// - [`CartError::ProductNotFound`]: no line holds an equal product.
    pub fn remove_product(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        let idx = self
            .items
            .iter()
            .position(|i| i.product == *product)
            .ok_or_else(|| CartError::ProductNotFound(product.name().to_string()))?;

        let remaining = self
            .items
            .get(idx)
            .map_or(0, |item| item.quantity.saturating_sub(quantity));

        if remaining == 0 {
            self.items.remove(idx);

            debug!(product = product.name(), "removed line");
        } else if let Some(item) = self.items.get_mut(idx) {
            item.quantity = remaining;

            debug!(product = product.name(), quantity = remaining, "decreased line quantity");
        }

        Ok(())
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Calculate the discounted total of the cart.
    ///
    /// The discount service is asked once per line on every call, so rate changes made
    /// between calls are always reflected.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if a subtotal or the running total overflowed.
    #[tracing::instrument(name = "cart.calculate_total", skip(self), fields(lines = self.items.len()), err)]
    pub fn calculate_total(&self) -> Result<Decimal, TotalPriceError> {
        total_price(&self.items, &self.discounts)
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Quantity held for `product`, zero when absent.
    pub fn quantity_of(&self, product: &Product) -> u32 {
        self.items
            .iter()
            .find(|i| i.product == *product)
            .map_or(0, CartItem::quantity)
    }

    /// Line items, in the order they were first added.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The discount service pricing this cart.
    pub fn discounts(&self) -> &D {
        &self.discounts
    }

    /// Mutable access to the discount service, for changing rates between totals.
    pub fn discounts_mut(&mut self) -> &mut D {
        &mut self.discounts
    }
}
