//! # larder-core: Pure Pricing Logic for the Co-op Back Office
//!
//! Everything the order screens compute lives here as pure functions with
//! zero I/O: case/each price resolution, order totals and balance, and
//! wholesale grouping with partial-case completion.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Larder Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Browser console (external)                     │   │
//! │  │    Order editor ──► Wholesale editor ──► Print / CSV export     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON rows                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                larder-editor (edit workflow)                    │   │
//! │  │    OrderEditor, WholesaleEditor, EditorConfig                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ larder-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  types   │ │  money   │ │ pricing  │ │wholesale │          │   │
//! │  │   │ LineItem │ │  Money   │ │ Totals   │ │ Grouping │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATA STORE • NO NETWORK • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Line items, product snapshots, orders
//! - [`money`] - Money type with integer cents
//! - [`pricing`] - Per-line totals and order-level figures
//! - [`wholesale`] - Product grouping and case completion
//! - [`input`] - Parsing form text into numbers
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use larder_core::pricing::{line_total, OrderTotals};
//! use larder_core::{LineItem, Money, ProductSnapshot, TaxRate, Unit};
//! use rust_decimal::Decimal;
//!
//! let tomatoes = ProductSnapshot {
//!     ws_price: Some(Money::from_cents(1000)),
//!     u_price: Some(Money::from_cents(400)),
//!     pk: Some(Decimal::from(6)),
//!     ..Default::default()
//! };
//! let mut item = LineItem::from_product(tomatoes, Decimal::from(3));
//! item.selected_unit = Some(Unit::Each);
//! item.total = line_total(&item);
//! assert_eq!(item.total.cents(), 1200);
//!
//! let totals = OrderTotals::compute(&[item], TaxRate::zero());
//! assert_eq!(totals.balance.cents(), 1200);
//! ```

pub mod error;
pub mod input;
pub mod money;
pub mod pricing;
pub mod types;
pub mod wholesale;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{BalanceStatus, OrderTotals};
pub use types::*;
pub use wholesale::{GroupedItem, GroupingOptions, WholesaleSummary};
