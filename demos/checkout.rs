//! Checkout Example
//!
//! Loads a fixture set, prints the priced cart, takes payment for the total and then
//! re-prices the cart after raising the Electronics discount.
//!
//! Use `-f` to load a fixture set by name
//! Use `-b` to point at a different fixtures directory
//! Use `-e` to choose the Electronics rate applied after checkout

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use shopping_cart::{prelude::*, utils::ExampleCartArgs};

/// Checkout Example
#[expect(clippy::print_stdout, reason = "Example program output to user")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_target(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = ExampleCartArgs::parse();
    let fixture = Fixture::from_set_in(&args.fixture, &args.base_path)?;

    let mut cart = fixture.cart()?;

    Receipt::from_cart(&cart)?.write_to(io::stdout().lock())?;

    let mut payments = SimulatedPaymentService::new();
    let total = cart.calculate_total()?;

    if payments.process_payment(total) {
        if let Some(transaction_id) = payments.last_transaction_id() {
            println!("\nPayment of {total:.2} accepted, transaction {transaction_id}");
        }

        cart.clear();

        println!("Cart cleared, {} items remaining", cart.total_items());
    } else {
        println!("\nPayment of {total:.2} was declined");
    }

    let mut cart = fixture.cart()?;
    let before = cart.calculate_total()?;

    cart.discounts_mut()
        .set_category_discount("Electronics", args.electronics_rate)?;

    let after = cart.calculate_total()?;

    println!(
        "\nElectronics at {}: total {before:.2} -> {after:.2}",
        DiscountRate::try_from(args.electronics_rate)?
    );

    Ok(())
}
