//! Cart Fixtures

use serde::Deserialize;

/// Wrapper for cart contents in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Lines to add, in order
    pub items: Vec<CartItemFixture>,
}

/// Cart Item Fixture
#[derive(Debug, Deserialize)]
pub struct CartItemFixture {
    /// Product key from the products fixture
    pub product: String,

    /// Units to add
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}
