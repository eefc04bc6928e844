//! # Input Parsing
//!
//! Form fields arrive as text. They are parsed here once, at the boundary,
//! and everything past this point works with `Decimal` and [`Money`].
//!
//! ## Parsing Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field        Input          Result                                     │
//! │  ─────        ─────          ──────                                     │
//! │  quantity     "3"            3                                          │
//! │  quantity     "0", "-2", ""  1     (clamped, never an error)            │
//! │  price        "4.50"         Some($4.50)                                │
//! │  price        "abc", ""      None  (line totals to zero)                │
//! │  tax rate     "8.25"         825 bps                                    │
//! │  tax rate     "150"          Err: OutOfRange                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::TaxRate;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest tax rate accepted from configuration, in basis points (100%).
pub const MAX_TAX_RATE_BPS: u32 = 10_000;

// =============================================================================
// Quantities
// =============================================================================

/// Clamps a quantity to at least 1.
pub fn clamp_quantity(qty: Decimal) -> Decimal {
    if qty <= Decimal::ZERO {
        Decimal::ONE
    } else {
        qty
    }
}

/// Parses a quantity field; blank, non-numeric and non-positive input all
/// become 1.
///
/// ## Example
/// ```rust
/// use larder_core::input::parse_quantity;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_quantity("2.5"), Decimal::new(25, 1));
/// assert_eq!(parse_quantity("-3"), Decimal::ONE);
/// assert_eq!(parse_quantity("lots"), Decimal::ONE);
/// ```
pub fn parse_quantity(text: &str) -> Decimal {
    Decimal::from_str(text.trim())
        .map(clamp_quantity)
        .unwrap_or(Decimal::ONE)
}

// =============================================================================
// Prices
// =============================================================================

/// Parses a price field. Unreadable input yields `None`.
pub fn parse_price(text: &str) -> Option<Money> {
    Money::parse(text)
}

// =============================================================================
// Tax Rates
// =============================================================================

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > MAX_TAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: MAX_TAX_RATE_BPS as i64,
        });
    }

    Ok(())
}

/// Parses a percentage such as `"8.25"` into a validated [`TaxRate`].
pub fn parse_tax_rate_percent(text: &str) -> ValidationResult<TaxRate> {
    let pct = Decimal::from_str(text.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: "tax_rate".to_string(),
        reason: format!("'{}' is not a percentage", text.trim()),
    })?;

    if pct < Decimal::ZERO {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: MAX_TAX_RATE_BPS as i64,
        });
    }

    let bps = pct
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|bps| bps.round().to_u32())
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: MAX_TAX_RATE_BPS as i64,
        })?;
    validate_tax_rate_bps(bps)?;

    Ok(TaxRate::from_bps(bps))
}
