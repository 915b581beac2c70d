//! Utils

use clap::Parser;
use rust_decimal::Decimal;

/// Arguments for the checkout example
#[derive(Debug, Parser)]
pub struct ExampleCartArgs {
    /// Fixture set to use for the catalog, discounts & cart
    #[clap(short, long, default_value = "default")]
    pub fixture: String,

    /// Directory holding the fixture sets
    #[clap(short, long, default_value = "./fixtures")]
    pub base_path: String,

    /// Electronics rate to apply after checkout, as a fraction
    #[clap(short, long, default_value = "0.20")]
    pub electronics_rate: Decimal,
}
