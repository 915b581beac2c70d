//! Discount Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::fixtures::FixtureError;

/// Wrapper for discount overrides in YAML
#[derive(Debug, Deserialize)]
pub struct DiscountsFixture {
    /// Map of category -> rate (e.g., "15%" or "0.15")
    pub discounts: FxHashMap<String, String>,
}

/// Parse a rate string (e.g., "15%" or "0.15") into a fraction
///
/// Accepts two formats:
/// - Percentage format: "15%" for 15%
/// - Decimal format: "0.15" for 15%
///
/// Range checks are left to the discount table.
///
/// # Errors
///
/// Returns an error if the string cannot be parsed.
pub fn parse_rate(s: &str) -> Result<Decimal, FixtureError> {
    let trimmed = s.trim();

    if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .ok()
            .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
            .ok_or_else(|| FixtureError::InvalidRate(s.to_string()))
    } else {
        trimmed
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidRate(s.to_string()))
    }
}
