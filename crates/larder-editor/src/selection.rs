//! # Row Selection
//!
//! Table menus act on the rows the user ticked. The selection is handed to
//! the editor together with the action, so nothing outside the call holds
//! on to it.
//!
//! ```text
//! ticked rows {3, 1, 3} ──► Selection [1, 3] ──┐
//!                                              ├─► editor.apply_to_selection
//! menu item "Switch to EA" ──► RowAction ──────┘
//! ```

use larder_core::{CoreError, CoreResult, LineItem, Unit};
use rust_decimal::Decimal;
use tracing::debug;

use crate::edit;

/// Selected row indices, sorted ascending without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(Vec<usize>);

impl Selection {
    pub fn new(rows: impl IntoIterator<Item = usize>) -> Self {
        let mut rows: Vec<usize> = rows.into_iter().collect();
        rows.sort_unstable();
        rows.dedup();
        Selection(rows)
    }

    pub fn rows(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<usize> for Selection {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Selection::new(iter)
    }
}

/// Bulk actions offered by the table menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Remove,
    SetUnit(Unit),
    SetQuantity(Decimal),
}

/// Applies an action to every selected row.
///
/// All rows are checked before anything changes, so a stale index or a
/// locked unit leaves the items untouched. Returns the number of rows
/// affected.
pub(crate) fn apply(
    items: &mut Vec<LineItem>,
    selection: &Selection,
    action: RowAction,
) -> CoreResult<usize> {
    for &index in selection.rows() {
        let item = items.get(index).ok_or(CoreError::LineItemNotFound {
            index,
            len: items.len(),
        })?;
        if let RowAction::SetUnit(_) = action {
            edit::ensure_switchable(item)?;
        }
    }

    debug!(rows = ?selection.rows(), ?action, "Applying row action");

    match action {
        RowAction::Remove => {
            for &index in selection.rows().iter().rev() {
                items.remove(index);
            }
        }
        RowAction::SetUnit(unit) => {
            for &index in selection.rows() {
                edit::set_unit(&mut items[index], unit)?;
            }
        }
        RowAction::SetQuantity(qty) => {
            for &index in selection.rows() {
                edit::set_quantity(&mut items[index], qty);
            }
        }
    }

    Ok(selection.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_sorts_and_dedups() {
        let selection = Selection::new([3, 1, 3, 0]);
        assert_eq!(selection.rows(), &[0, 1, 3]);
        assert_eq!(selection.len(), 3);

        let collected: Selection = vec![2, 2].into_iter().collect();
        assert_eq!(collected.rows(), &[2]);
        assert!(Selection::default().is_empty());
    }
}
