//! # Error Types
//!
//! Domain-specific error types for larder-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  larder-core errors (this file)                                        │
//! │  ├── CoreError        - Edit operations that cannot be applied         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  larder-editor errors (separate crate)                                 │
//! │  └── EditorError      - Config, I/O and JSON failures + CoreError      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → EditorError → UI message          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Numeric form input never produces an error here: quantities clamp and
//! unparseable prices become an absent price. Errors are reserved for edits
//! that cannot be applied at all.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by line-item edit operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested row does not exist.
    ///
    /// ## When This Occurs
    /// - The table was re-rendered after a removal and the view still holds
    ///   the old row index
    /// - A selection refers to rows of a different order
    #[error("Line item {index} not found (order has {len} items)")]
    LineItemNotFound { index: usize, len: usize },

    /// The item's unit is fixed.
    ///
    /// Happens when no product is attached, or the product's each price is
    /// missing or equal to its case price.
    #[error("Unit cannot be changed for '{description}'")]
    UnitNotSwitchable { description: String },

    /// A configured or typed value was rejected.
    #[error("Rejected input: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Rejections from the strict parsers in [`crate::input`], used for
/// configuration values rather than table cells.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Tax rates outside 0..=100%.
    #[error("{field} must be from {min} to {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Text that does not read as a number or unit code.
    #[error("{field} is not readable: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result of an edit operation.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LineItemNotFound { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Line item 4 not found (order has 2 items)");

        let err = CoreError::UnitNotSwitchable {
            description: "Oat Milk".to_string(),
        };
        assert_eq!(err.to_string(), "Unit cannot be changed for 'Oat Milk'");
    }

    #[test]
    fn test_rejected_input_wraps() {
        let err: CoreError = ValidationError::OutOfRange {
            field: "tax_rate_bps".to_string(),
            min: 0,
            max: 10_000,
        }
        .into();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Rejected input: tax_rate_bps must be from 0 to 10000"
        );

        let err = ValidationError::InvalidFormat {
            field: "selected_unit".to_string(),
            reason: "expected CS or EA".to_string(),
        };
        assert_eq!(err.to_string(), "selected_unit is not readable: expected CS or EA");
    }
}
