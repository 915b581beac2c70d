//! Receipt

use std::io;

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    discounts::DiscountService,
    pricing::{TotalPriceError, line_subtotal},
};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating prices from cart items.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// IO error
    #[error("IO error")]
    IO(#[source] io::Error),
}

/// One cart line with its price before and after discount.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    name: String,
    category: String,
    quantity: u32,
    unit_price: Decimal,
    base_price: Decimal,
    discounted_price: Decimal,
}

impl ReceiptLine {
    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product category
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Units purchased
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of a single unit
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Line price before discount.
    pub fn base_price(&self) -> Decimal {
        self.base_price
    }

    /// Line price after discount.
    pub fn discounted_price(&self) -> Decimal {
        self.discounted_price
    }

    /// Amount taken off the line.
    pub fn savings(&self) -> Decimal {
        self.base_price - self.discounted_price
    }
}

/// Final receipt for a priced cart.
#[derive(Debug, Clone)]
pub struct Receipt {
    lines: Vec<ReceiptLine>,
    subtotal: Decimal,
    total: Decimal,
    total_items: u64,
}

impl Receipt {
    /// Price every line of `cart` against its discount service.
    ///
    /// The discount service is consulted once per line, so the total matches
    /// [`Cart::calculate_total`] for the same rates.
    ///
    /// # Errors
    ///
    /// Returns a `ReceiptError` if a line subtotal or a running total overflowed.
    pub fn from_cart<D: DiscountService>(cart: &Cart<D>) -> Result<Self, ReceiptError> {
        let mut lines = Vec::with_capacity(cart.len());
        let mut subtotal = Decimal::ZERO;
        let mut total = Decimal::ZERO;

        for item in cart.items() {
            let product = item.product();
            let base_price = line_subtotal(item)?;
            let discounted_price = cart.discounts().apply_discount(product, base_price);

            subtotal = subtotal
                .checked_add(base_price)
                .ok_or(TotalPriceError::TotalOverflow)?;

            total = total
                .checked_add(discounted_price)
                .ok_or(TotalPriceError::TotalOverflow)?;

            lines.push(ReceiptLine {
                name: product.name().to_string(),
                category: product.category().to_string(),
                quantity: item.quantity(),
                unit_price: product.price(),
                base_price,
                discounted_price,
            });
        }

        Ok(Receipt {
            lines,
            subtotal,
            total,
            total_items: cart.total_items(),
        })
    }

    /// Receipt lines, in cart order.
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Total before discounts.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Total after discounts.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Number of units across all lines.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Total amount saved by discounts.
    pub fn savings(&self) -> Decimal {
        self.subtotal - self.total
    }

    /// Savings as percentage points of the subtotal; zero when the subtotal is zero.
    pub fn savings_percent(&self) -> Decimal {
        self.savings()
            .checked_div(self.subtotal)
            .and_then(|fraction| fraction.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    }

    /// Writes the receipt as a table followed by a summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record([
            "Item",
            "Category",
            "Qty",
            "Unit Price",
            "Base Price",
            "Discounted Price",
            "Savings",
        ]);

        for line in &self.lines {
            builder.push_record([
                line.name.clone(),
                line.category.clone(),
                line.quantity.to_string(),
                format!("{:.2}", line.unit_price),
                format!("{:.2}", line.base_price),
                format!("{:.2}", line.discounted_price),
                format!("{:.2}", line.savings()),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..), Alignment::right());

        writeln!(out, "\n{table}").map_err(ReceiptError::IO)?;

        writeln!(out, " Items:    {}", self.total_items).map_err(ReceiptError::IO)?;
        writeln!(out, " Subtotal: {:.2}", self.subtotal).map_err(ReceiptError::IO)?;
        writeln!(out, " Total:    {:.2}", self.total).map_err(ReceiptError::IO)?;
        writeln!(
            out,
            " Savings:  ({:.2}%) {:.2}",
            self.savings_percent(),
            self.savings()
        )
        .map_err(ReceiptError::IO)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{discounts::CategoryDiscounts, products::Product};

    use super::*;

    fn test_cart() -> TestResult<Cart<CategoryDiscounts>> {
        let mut cart = Cart::new(CategoryDiscounts::new());

        cart.add_product(&Product::new("Laptop", Decimal::new(1000, 0), "Electronics")?, 1)?;
        cart.add_product(&Product::new("T-Shirt", Decimal::new(100, 0), "Clothing")?, 2)?;
        cart.add_product(&Product::new("Programming Rust", Decimal::new(50, 0), "Books")?, 1)?;
        cart.add_product(&Product::new("Apple", Decimal::new(5, 0), "Food")?, 10)?;

        Ok(cart)
    }

    #[test]
    fn from_cart_prices_each_line() -> TestResult {
        let receipt = Receipt::from_cart(&test_cart()?)?;

        let discounted: Vec<Decimal> = receipt
            .lines()
            .iter()
            .map(ReceiptLine::discounted_price)
            .collect();

        assert_eq!(
            discounted,
            [
                Decimal::new(900, 0),
                Decimal::new(170, 0),
                Decimal::new(47_50, 2),
                Decimal::new(50, 0),
            ]
        );

        let shirt = receipt.lines().get(1).ok_or("missing shirt line")?;

        assert_eq!(shirt.name(), "T-Shirt");
        assert_eq!(shirt.category(), "Clothing");
        assert_eq!(shirt.quantity(), 2);
        assert_eq!(shirt.unit_price(), Decimal::new(100, 0));
        assert_eq!(shirt.base_price(), Decimal::new(200, 0));
        assert_eq!(shirt.savings(), Decimal::new(30, 0));

        Ok(())
    }

    #[test]
    fn totals_match_cart() -> TestResult {
        let cart = test_cart()?;
        let receipt = Receipt::from_cart(&cart)?;

        assert_eq!(receipt.subtotal(), Decimal::new(1300, 0));
        assert_eq!(receipt.total(), cart.calculate_total()?);
        assert_eq!(receipt.total(), Decimal::new(1167_50, 2));
        assert_eq!(receipt.savings(), Decimal::new(132_50, 2));
        assert_eq!(receipt.total_items(), 14);

        Ok(())
    }

    #[test]
    fn savings_percent_is_zero_for_empty_receipt() -> TestResult {
        let cart = Cart::new(CategoryDiscounts::new());
        let receipt = Receipt::from_cart(&cart)?;

        assert!(receipt.lines().is_empty());
        assert_eq!(receipt.savings_percent(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn savings_percent_is_share_of_subtotal() -> TestResult {
        let mut cart = Cart::new(CategoryDiscounts::new());

        cart.add_product(&Product::new("Laptop", Decimal::new(1000, 0), "Electronics")?, 1)?;

        let receipt = Receipt::from_cart(&cart)?;

        assert_eq!(receipt.savings_percent(), Decimal::new(10, 0));

        Ok(())
    }

    #[test]
    fn write_to_renders_lines_and_summary() -> TestResult {
        let receipt = Receipt::from_cart(&test_cart()?)?;
        let mut out = Vec::new();

        receipt.write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("T-Shirt"));
        assert!(rendered.contains("Discounted Price"));
        assert!(rendered.contains("1167.50"));
        assert!(rendered.contains("Items:    14"));

        Ok(())
    }
}
