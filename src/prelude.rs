//! Shopping cart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartItem},
    discounts::{CategoryDiscounts, DiscountError, DiscountRate, DiscountService},
    fixtures::{Fixture, FixtureError},
    payments::{PaymentService, SimulatedPaymentService, TransactionId},
    pricing::TotalPriceError,
    products::{Product, ProductError},
    receipt::{Receipt, ReceiptError, ReceiptLine},
};
