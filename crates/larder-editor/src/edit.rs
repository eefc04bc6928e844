//! Single-row edits shared by both editors. Every edit ends by rewriting
//! the row's `total`.

use larder_core::input::clamp_quantity;
use larder_core::pricing::{effective_unit_price, recompute_total};
use larder_core::{CoreError, CoreResult, LineItem, Money, Unit};
use rust_decimal::Decimal;

pub(crate) fn item_mut(items: &mut [LineItem], index: usize) -> CoreResult<&mut LineItem> {
    let len = items.len();
    items
        .get_mut(index)
        .ok_or(CoreError::LineItemNotFound { index, len })
}

pub(crate) fn ensure_switchable(item: &LineItem) -> CoreResult<()> {
    if item.can_switch_unit() {
        Ok(())
    } else {
        Err(CoreError::UnitNotSwitchable {
            description: item.description.clone(),
        })
    }
}

/// Switches CS/EA and re-captures the price for the new unit.
pub(crate) fn set_unit(item: &mut LineItem, unit: Unit) -> CoreResult<()> {
    ensure_switchable(item)?;
    item.selected_unit = Some(unit);
    item.price = effective_unit_price(item);
    recompute_total(item);
    Ok(())
}

pub(crate) fn set_quantity(item: &mut LineItem, qty: Decimal) {
    item.quantity = clamp_quantity(qty);
    recompute_total(item);
}

pub(crate) fn set_description(item: &mut LineItem, description: String) {
    item.description = description;
    recompute_total(item);
}

pub(crate) fn set_price(item: &mut LineItem, price: Option<Money>) {
    item.price = price;
    recompute_total(item);
}
