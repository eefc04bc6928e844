//! # Retail Order Editor
//!
//! Holds one member order while it is being edited.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User Action            Editor Call               Effect                │
//! │  ───────────            ───────────               ──────                │
//! │                                                                         │
//! │  Pick CS/EA ──────────► update_unit() ─────────► price + total of row  │
//! │  Type quantity ───────► update_quantity_text() ► clamp ≥ 1, total      │
//! │  Type price ──────────► update_price_text() ───► price or none, total  │
//! │  Edit description ────► update_description() ──► total                 │
//! │  Click remove ────────► remove_line_item() ────► row gone              │
//! │  Menu on ticked rows ─► apply_to_selection() ──► bulk edit             │
//! │                                                                         │
//! │  Every call ends with refresh(): OrderTotals::compute on all rows.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use larder_core::input::{parse_price, parse_quantity};
use larder_core::pricing::recompute_total;
use larder_core::{
    BalanceStatus, CoreResult, LineItem, Money, Order, OrderTotals, ProductSnapshot, TaxRate, Unit,
};
use rust_decimal::Decimal;
use tracing::debug;

use crate::edit;
use crate::selection::{self, RowAction, Selection};

/// A retail order plus its derived totals.
///
/// Totals are always in step with the rows: every mutating method
/// recomputes the touched row's `total` and then re-derives [`OrderTotals`].
#[derive(Debug, Clone)]
pub struct OrderEditor {
    order: Order,
    tax_rate: TaxRate,
    totals: OrderTotals,
}

impl OrderEditor {
    /// Wraps a loaded order. Stored line totals are kept as loaded.
    pub fn new(order: Order, tax_rate: TaxRate) -> Self {
        let totals = OrderTotals::compute(&order.line_items, tax_rate);
        OrderEditor {
            order,
            tax_rate,
            totals,
        }
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.order.line_items
    }

    pub fn totals(&self) -> &OrderTotals {
        &self.totals
    }

    pub fn balance_status(&self) -> BalanceStatus {
        self.totals.balance_status()
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn set_tax_rate(&mut self, tax_rate: TaxRate) {
        self.tax_rate = tax_rate;
        self.refresh();
    }

    /// Consumes the editor, returning the order ready to be saved.
    pub fn into_order(self) -> Order {
        self.order
    }

    /// Appends a line and returns its index.
    pub fn add_line_item(&mut self, mut item: LineItem) -> usize {
        recompute_total(&mut item);
        debug!(order_id = %self.order.id, kind = ?item.kind, "Adding line item");
        self.order.line_items.push(item);
        self.refresh();
        self.order.line_items.len() - 1
    }

    /// Appends a product line in the product's default unit.
    pub fn add_product(&mut self, product: ProductSnapshot, quantity: Decimal) -> usize {
        self.add_line_item(LineItem::from_product(product, quantity))
    }

    /// Re-prices every row from its product snapshot or own price.
    pub fn reprice_all(&mut self) {
        larder_core::pricing::recompute_all(&mut self.order.line_items);
        self.refresh();
    }

    pub fn update_unit(&mut self, index: usize, unit: Unit) -> CoreResult<()> {
        edit::set_unit(edit::item_mut(&mut self.order.line_items, index)?, unit)?;
        debug!(index, %unit, "Updated unit");
        self.refresh();
        Ok(())
    }

    /// Sets the quantity; non-positive values become 1.
    pub fn update_quantity(&mut self, index: usize, quantity: Decimal) -> CoreResult<()> {
        edit::set_quantity(edit::item_mut(&mut self.order.line_items, index)?, quantity);
        debug!(index, %quantity, "Updated quantity");
        self.refresh();
        Ok(())
    }

    /// Sets the quantity from a form field.
    pub fn update_quantity_text(&mut self, index: usize, text: &str) -> CoreResult<()> {
        self.update_quantity(index, parse_quantity(text))
    }

    pub fn update_description(
        &mut self,
        index: usize,
        description: impl Into<String>,
    ) -> CoreResult<()> {
        edit::set_description(
            edit::item_mut(&mut self.order.line_items, index)?,
            description.into(),
        );
        self.refresh();
        Ok(())
    }

    pub fn update_price(&mut self, index: usize, price: Option<Money>) -> CoreResult<()> {
        edit::set_price(edit::item_mut(&mut self.order.line_items, index)?, price);
        debug!(index, ?price, "Updated price");
        self.refresh();
        Ok(())
    }

    /// Sets the price from a form field; unreadable text clears the price
    /// and the row totals zero.
    pub fn update_price_text(&mut self, index: usize, text: &str) -> CoreResult<()> {
        self.update_price(index, parse_price(text))
    }

    pub fn remove_line_item(&mut self, index: usize) -> CoreResult<LineItem> {
        edit::item_mut(&mut self.order.line_items, index)?;
        let removed = self.order.line_items.remove(index);
        debug!(index, description = %removed.description, "Removed line item");
        self.refresh();
        Ok(removed)
    }

    /// Applies a menu action to the ticked rows. Returns the rows affected.
    pub fn apply_to_selection(
        &mut self,
        selection: &Selection,
        action: RowAction,
    ) -> CoreResult<usize> {
        let affected = selection::apply(&mut self.order.line_items, selection, action)?;
        self.refresh();
        Ok(affected)
    }

    fn refresh(&mut self) {
        self.totals = OrderTotals::compute(&self.order.line_items, self.tax_rate);
    }
}
