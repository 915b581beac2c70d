//! Prices

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{cart::CartItem, discounts::DiscountService};

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// Unit price times quantity did not fit in a decimal (product name).
    #[error("line subtotal for {0} overflowed")]
    LineOverflow(String),

    /// Running total did not fit in a decimal.
    #[error("cart total overflowed")]
    TotalOverflow,
}

/// Undiscounted price of a line: unit price times quantity.
///
/// # Errors
///
/// Returns [`TotalPriceError::LineOverflow`] if the multiplication overflows.
pub fn line_subtotal(item: &CartItem) -> Result<Decimal, TotalPriceError> {
    item.product()
        .price()
        .checked_mul(Decimal::from(item.quantity()))
        .ok_or_else(|| TotalPriceError::LineOverflow(item.product().name().to_string()))
}

/// Calculates the discounted total of a list of line items.
///
/// `discounts` is consulted exactly once per line, in order. An empty list totals zero.
///
/// # Errors
///
/// - [`TotalPriceError::LineOverflow`]: a line subtotal overflowed.
/// - [`TotalPriceError::TotalOverflow`]: the running total overflowed.
pub fn total_price<D: DiscountService + ?Sized>(
    items: &[CartItem],
    discounts: &D,
) -> Result<Decimal, TotalPriceError> {
    items.iter().try_fold(Decimal::ZERO, |acc, item| {
        let subtotal = line_subtotal(item)?;
        let discounted = discounts.apply_discount(item.product(), subtotal);

        acc.checked_add(discounted)
            .ok_or(TotalPriceError::TotalOverflow)
    })
}
