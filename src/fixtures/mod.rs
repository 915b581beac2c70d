//! Fixtures
//!
//! YAML configuration for a catalog, discount overrides and a cart's contents. A fixture
//! set named `name` is read from `products/{name}.yml`, `discounts/{name}.yml` and
//! `carts/{name}.yml` under the base path.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{Cart, CartError},
    discounts::{CategoryDiscounts, DiscountError},
    fixtures::{carts::CartFixture, discounts::DiscountsFixture, products::ProductsFixture},
    products::{Product, ProductError},
};

pub mod carts;
pub mod discounts;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid discount rate format
    #[error("Invalid discount rate format: {0}")]
    InvalidRate(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product failed validation
    #[error(transparent)]
    Product(#[from] ProductError),

    /// Discount rate failed validation
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Cart rejected an item
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Products keyed by their fixture key
    products: FxHashMap<String, Product>,

    /// Default rates plus any loaded overrides
    discounts: CategoryDiscounts,

    /// Cart contents, in file order
    items: Vec<(Product, u32)>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: FxHashMap::default(),
            discounts: CategoryDiscounts::new(),
            items: Vec::new(),
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a product is invalid.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for (key, product_fixture) in fixture.products {
            let product = Product::try_from(product_fixture)?;

            self.products.insert(key, product);
        }

        debug!(path = %file_path.display(), count = self.products.len(), "loaded products");

        Ok(self)
    }

    /// Load discount rate overrides from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a rate is invalid.
    pub fn load_discounts(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("discounts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: DiscountsFixture = serde_norway::from_str(&contents)?;

        for (category, rate) in fixture.discounts {
            let rate = discounts::parse_rate(&rate)?;

            self.discounts.set_category_discount(&category, rate)?;
        }

        debug!(path = %file_path.display(), categories = self.discounts.len(), "loaded discounts");

        Ok(self)
    }

    /// Load cart contents from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if referenced products don't
    /// exist.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        for item in fixture.items {
            let product = self.product(&item.product)?.clone();

            self.items.push((product, item.quantity));
        }

        debug!(path = %file_path.display(), lines = self.items.len(), "loaded cart");

        Ok(self)
    }

    /// Load a complete fixture set (products, discounts, and cart with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in(name, "./fixtures")
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(name: &str, base_path: impl Into<PathBuf>) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_products(name)?
            .load_discounts(name)?
            .load_cart(name)?;

        Ok(fixture)
    }

    /// Get a product by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product, FixtureError> {
        self.products
            .get(key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// The discount table, with loaded overrides applied
    pub fn discounts(&self) -> &CategoryDiscounts {
        &self.discounts
    }

    /// Build a cart holding the loaded contents, priced by a copy of the discount table
    ///
    /// # Errors
    ///
    /// Returns an error if the cart rejects an item (for example a zero quantity).
    pub fn cart(&self) -> Result<Cart<CategoryDiscounts>, FixtureError> {
        let mut cart = Cart::new(self.discounts.clone());

        for (product, quantity) in &self.items {
            cart.add_product(product, *quantity)?;
        }

        Ok(cart)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
