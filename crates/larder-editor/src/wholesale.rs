//! # Wholesale Order Editor
//!
//! Holds a wholesale order and keeps its grouped view current. Edits go to
//! the flat line items; the grouping is rebuilt from them afterwards, so a
//! synthetic "add N EA" line never becomes part of the stored order.

use larder_core::wholesale::group_line_items;
use larder_core::{CoreResult, GroupingOptions, LineItem, Unit, WholesaleOrder, WholesaleSummary};
use rust_decimal::Decimal;
use tracing::debug;

use crate::edit;
use crate::selection::{self, RowAction, Selection};

#[derive(Debug, Clone)]
pub struct WholesaleEditor {
    order: WholesaleOrder,
    options: GroupingOptions,
    summary: WholesaleSummary,
}

impl WholesaleEditor {
    pub fn new(order: WholesaleOrder, options: GroupingOptions) -> Self {
        let summary = group_line_items(&order.line_items, options);
        WholesaleEditor {
            order,
            options,
            summary,
        }
    }

    pub fn order(&self) -> &WholesaleOrder {
        &self.order
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.order.line_items
    }

    /// Grouped rows plus product, adjustment and order totals.
    pub fn summary(&self) -> &WholesaleSummary {
        &self.summary
    }

    pub fn options(&self) -> GroupingOptions {
        self.options
    }

    /// Turns case-completion lines on or off and regroups.
    pub fn set_calculate_adjustments(&mut self, enabled: bool) {
        debug!(enabled, "Toggling case-completion adjustments");
        self.options.calculate_adjustments = enabled;
        self.regroup();
    }

    pub fn add_line_item(&mut self, mut item: LineItem) -> usize {
        larder_core::pricing::recompute_total(&mut item);
        debug!(order_id = %self.order.id, description = %item.description, "Adding wholesale line");
        self.order.line_items.push(item);
        self.regroup();
        self.order.line_items.len() - 1
    }

    pub fn update_quantity(&mut self, index: usize, quantity: Decimal) -> CoreResult<()> {
        edit::set_quantity(edit::item_mut(&mut self.order.line_items, index)?, quantity);
        debug!(index, %quantity, "Updated wholesale quantity");
        self.regroup();
        Ok(())
    }

    pub fn update_unit(&mut self, index: usize, unit: Unit) -> CoreResult<()> {
        edit::set_unit(edit::item_mut(&mut self.order.line_items, index)?, unit)?;
        debug!(index, %unit, "Updated wholesale unit");
        self.regroup();
        Ok(())
    }

    pub fn remove_line_item(&mut self, index: usize) -> CoreResult<LineItem> {
        edit::item_mut(&mut self.order.line_items, index)?;
        let removed = self.order.line_items.remove(index);
        self.regroup();
        Ok(removed)
    }

    pub fn apply_to_selection(
        &mut self,
        selection: &Selection,
        action: RowAction,
    ) -> CoreResult<usize> {
        let affected = selection::apply(&mut self.order.line_items, selection, action)?;
        self.regroup();
        Ok(affected)
    }

    pub fn into_order(self) -> WholesaleOrder {
        self.order
    }

    fn regroup(&mut self) {
        self.summary = group_line_items(&self.order.line_items, self.options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::{Money, ProductSnapshot};

    fn oats() -> ProductSnapshot {
        ProductSnapshot {
            unf: Some("2201".to_string()),
            description: Some("Rolled Oats".to_string()),
            pk: Some(Decimal::from(6)),
            ws_price: Some(Money::from_cents(2400)),
            u_price: Some(Money::from_cents(450)),
            ws_price_cost: Some(Money::from_cents(1800)),
            u_price_cost: Some(Money::from_cents(300)),
            unit_type: Some(Unit::Each),
            ..Default::default()
        }
    }

    fn editor(calculate_adjustments: bool) -> WholesaleEditor {
        let mut line = LineItem::from_product(oats(), Decimal::from(4));
        line.order_id = Some("ord-1".to_string());
        let order = WholesaleOrder {
            line_items: vec![line],
            ..Default::default()
        };
        WholesaleEditor::new(order, GroupingOptions { calculate_adjustments })
    }

    #[test]
    fn test_partial_case_without_adjustments() {
        let editor = editor(false);
        let group = &editor.summary().groups[0];
        assert_eq!(group.case_completion.unwrap().quantity, Decimal::from(2));
        assert_eq!(group.line_items.len(), 1);
        assert_eq!(editor.summary().order_total, Money::from_cents(1200));
    }

    #[test]
    fn test_toggle_adjustments_regroups() {
        let mut editor = editor(false);
        editor.set_calculate_adjustments(true);

        let group = &editor.summary().groups[0];
        assert_eq!(group.qty_sum, Decimal::ONE);
        assert_eq!(group.line_items.len(), 2);
        assert_eq!(editor.summary().adjustment_total, Money::from_cents(600));
        assert_eq!(editor.summary().order_total, Money::from_cents(1800));

        // the synthetic line lives only in the grouped view
        assert_eq!(editor.line_items().len(), 1);
    }

    #[test]
    fn test_quantity_edit_completes_case() {
        let mut editor = editor(true);
        editor.update_quantity(0, Decimal::from(6)).unwrap();

        let group = &editor.summary().groups[0];
        assert!(group.case_completion.is_none());
        assert_eq!(group.qty_sum, Decimal::ONE);
        assert_eq!(editor.summary().adjustment_total, Money::zero());
    }

    #[test]
    fn test_unit_switch_to_case() {
        let mut editor = editor(false);
        editor.update_unit(0, Unit::Case).unwrap();

        let group = &editor.summary().groups[0];
        assert_eq!(group.qty_units, Decimal::from(24));
        assert_eq!(group.qty_sum, Decimal::from(4));
        assert_eq!(editor.summary().product_total, Money::from_cents(7200));
    }

    #[test]
    fn test_remove_last_line_empties_summary() {
        let mut editor = editor(true);
        editor.remove_line_item(0).unwrap();
        assert!(editor.summary().groups.is_empty());
        assert_eq!(editor.summary().order_total, Money::zero());
        assert!(editor.remove_line_item(0).is_err());
    }
}
