//! Price formatting helpers using decimal arithmetic.
//!
//! Monetary amounts are carried as [`rust_decimal::Decimal`] throughout the
//! workspace so that cart totals never accumulate floating-point drift.
//! Display formatting lives here so every component renders prices the same
//! way.

use rust_decimal::Decimal;

/// Format a decimal amount as a USD display string (e.g., "$19.99").
///
/// Always renders exactly two fractional digits.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    format!("${amount:.2}")
}
