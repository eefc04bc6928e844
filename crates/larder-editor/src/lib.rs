//! # larder-editor: Order Edit Workflow
//!
//! Owns one loaded order at a time, applies the edits a user makes in the
//! order screens, and keeps every derived figure current through
//! `larder-core`.
//!
//! ## Modules
//!
//! - [`order`] - Retail order editor (totals, taxes, balance)
//! - [`wholesale`] - Supplier order editor (grouping, case completion)
//! - [`selection`] - Bulk actions on ticked rows
//! - [`config`] - Tax rate, currency display, wholesale switches
//! - [`error`] - Editor error type and console payload
//!
//! ## Example Usage
//!
//! ```rust
//! use larder_core::{LineItem, LineItemKind, Money, Order, TaxRate};
//! use larder_editor::OrderEditor;
//!
//! let mut editor = OrderEditor::new(Order::default(), TaxRate::from_bps(500));
//! let fee = editor.add_line_item(LineItem::new(LineItemKind::Adjustment, "Bag fee"));
//! editor.update_price_text(fee, "2.00").unwrap();
//!
//! assert_eq!(editor.totals().taxes, Money::from_cents(10));
//! assert_eq!(editor.balance_status().to_string(), "Balance Due: $2.10");
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

pub mod config;
mod edit;
pub mod error;
pub mod order;
pub mod selection;
pub mod wholesale;

pub use config::EditorConfig;
pub use error::{EditorError, EditorResult, ErrorCode, ErrorPayload};
pub use order::OrderEditor;
pub use selection::{RowAction, Selection};
pub use wholesale::WholesaleEditor;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise editor internals log at debug.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,larder=debug,larder_editor=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Reads an order (retail or wholesale) from a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> EditorResult<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
