//! # Wholesale Grouping
//!
//! Folds a wholesale order's flat line items into one row per product for
//! supplier review, and works out how many extra each-units are needed to
//! round every product up to whole cases.
//!
//! ## Grouping Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  line items (from many retail orders)                                   │
//! │     │                                                                   │
//! │     │ key = unf + upc_code   (or description without a product)         │
//! │     ▼                                                                   │
//! │  GroupedItem ── qty_units += EA qty | CS qty × pk                       │
//! │              ── total_sum += round2(ws_price_cost × case qty)           │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  qty_units mod pk ≠ 0 ?                                                 │
//! │     ├─ yes ─► case completion: |remainder − pk| EA at u_price_cost      │
//! │     │          (folded in as "add N EA" when adjustments are on)        │
//! │     └─ no ──► lines added by hand reported as qty_adjustments           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each-units are tracked exactly and cases are derived from them, so three
//! lines of 4 EA from a 12-pack come out as exactly one case.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{LineItem, LineItemKind, ProductSnapshot, Unit};

/// Caller switches for [`group_line_items`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GroupingOptions {
    /// Append "add N EA" adjustment lines that complete partial cases.
    pub calculate_adjustments: bool,
}

/// Each-units needed to round a product up to the next full case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CaseCompletion {
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub quantity: Decimal,
    /// `quantity × u_price_cost`, rounded to the cent.
    #[ts(as = "f64")]
    pub cost: Money,
}

/// One product's aggregate across a wholesale order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GroupedItem {
    pub key: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductSnapshot>,
    /// Case-denominated quantity.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub qty_sum: Decimal,
    /// Each-denominated quantity.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub qty_units: Decimal,
    /// Cost basis of the group.
    #[ts(as = "f64")]
    pub total_sum: Money,
    /// Case-equivalent quantity of lines added by hand.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub qty_adjustments: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_completion: Option<CaseCompletion>,
    pub line_items: Vec<LineItem>,
}

impl GroupedItem {
    fn new(key: String, item: &LineItem) -> Self {
        let product = item.product().cloned();
        let description = product
            .as_ref()
            .and_then(|p| p.description.clone())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| item.description.clone());

        GroupedItem {
            key,
            description,
            product,
            qty_sum: Decimal::ZERO,
            qty_units: Decimal::ZERO,
            total_sum: Money::zero(),
            qty_adjustments: Decimal::ZERO,
            case_completion: None,
            line_items: Vec::new(),
        }
    }

    /// Pack size of the group's product, 1 without a product.
    pub fn pack_size(&self) -> Decimal {
        self.product
            .as_ref()
            .map(ProductSnapshot::pack_size)
            .unwrap_or(Decimal::ONE)
    }

    /// True when `qty_sum` is not a whole number of cases.
    pub fn is_partial_case(&self) -> bool {
        !self.qty_sum.fract().is_zero()
    }
}

/// Grouped rows plus order-level cost sums.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WholesaleSummary {
    pub groups: Vec<GroupedItem>,
    /// Cost of every non-adjustment line.
    #[ts(as = "f64")]
    pub product_total: Money,
    /// Hand-entered adjustments plus folded case completions.
    #[ts(as = "f64")]
    pub adjustment_total: Money,
    #[ts(as = "f64")]
    pub order_total: Money,
}

// =============================================================================
// Per-Item Contributions
// =============================================================================

/// Grouping key: product identity, or the description when no product is
/// attached.
pub fn group_key(item: &LineItem) -> String {
    match item.product() {
        Some(product) => product.identity(),
        None => item.description.clone(),
    }
}

/// The line's quantity in cases (`EA` lines contribute `quantity / pk`).
///
/// A quantity too large to convert contributes zero.
pub fn case_quantity(item: &LineItem) -> Decimal {
    match item.product() {
        Some(product) if item.unit() == Unit::Each => item
            .quantity()
            .checked_div(product.pack_size())
            .unwrap_or_default(),
        _ => item.quantity(),
    }
}

/// The line's quantity in each-units (`CS` lines contribute `quantity × pk`).
///
/// A quantity too large to convert contributes zero.
pub fn each_quantity(item: &LineItem) -> Decimal {
    match item.product() {
        Some(product) if item.unit() == Unit::Case => item
            .quantity()
            .checked_mul(product.pack_size())
            .unwrap_or_default(),
        _ => item.quantity(),
    }
}

/// Cost basis of one line.
///
/// With a product: `ws_price_cost × case quantity` rounded to the cent, a
/// missing cost counting as zero. Without one: the line's own `total`.
pub fn cost_total(item: &LineItem) -> Money {
    match item.product() {
        Some(product) => product
            .ws_price_cost
            .unwrap_or_default()
            .multiply_quantity(case_quantity(item))
            .unwrap_or_default(),
        None => item.total,
    }
}

/// Each-units to add so that `each_units` becomes a whole number of cases.
///
/// Returns `None` when nothing is missing: a zero or negative quantity, or
/// an exact multiple of `pk`.
pub fn case_completion_quantity(each_units: Decimal, pk: Decimal) -> Option<Decimal> {
    if each_units <= Decimal::ZERO || pk <= Decimal::ZERO {
        return None;
    }
    let remainder = each_units.checked_rem(pk)?;
    if remainder.is_zero() {
        return None;
    }
    Some((remainder - pk).abs())
}

// =============================================================================
// Grouping
// =============================================================================

/// Groups a wholesale order's lines by product.
///
/// Groups come out in the order their first line was encountered and keep
/// their lines in encounter order. No line is ever dropped; bad numbers only
/// degrade their own contribution to zero.
///
/// ## Example
/// ```rust
/// use larder_core::money::Money;
/// use larder_core::types::{LineItem, ProductSnapshot, Unit};
/// use larder_core::wholesale::{group_line_items, GroupingOptions};
/// use rust_decimal::Decimal;
///
/// let beans = ProductSnapshot {
///     unf: Some("4410".into()),
///     pk: Some(Decimal::from(12)),
///     ws_price_cost: Some(Money::from_cents(2400)),
///     u_price_cost: Some(Money::from_cents(200)),
///     unit_type: Some(Unit::Each),
///     ..Default::default()
/// };
/// let line = LineItem::from_product(beans, Decimal::from(14));
///
/// let options = GroupingOptions { calculate_adjustments: true };
/// let summary = group_line_items(&[line], options);
/// let group = &summary.groups[0];
/// assert_eq!(group.qty_sum, Decimal::from(2));
/// assert_eq!(group.case_completion.unwrap().quantity, Decimal::from(10));
/// ```
pub fn group_line_items(items: &[LineItem], options: GroupingOptions) -> WholesaleSummary {
    let mut groups: Vec<GroupedItem> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut summary = WholesaleSummary::default();

    for item in items {
        let key = group_key(item);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(GroupedItem::new(key, item));
            groups.len() - 1
        });
        let group = &mut groups[slot];

        let cost = cost_total(item);
        // an overflowing line leaves the running count as it was
        group.qty_units = group
            .qty_units
            .checked_add(each_quantity(item))
            .unwrap_or(group.qty_units);
        group.total_sum += cost;
        group.line_items.push(item.clone());

        if item.kind == LineItemKind::Adjustment {
            summary.adjustment_total += cost;
        } else {
            summary.product_total += cost;
        }
    }

    for group in &mut groups {
        finish_group(group, options, &mut summary);
    }

    summary.order_total = summary.product_total + summary.adjustment_total;
    summary.groups = groups;
    summary
}

/// Derives the case quantity and applies case completion to one group.
fn finish_group(group: &mut GroupedItem, options: GroupingOptions, summary: &mut WholesaleSummary) {
    let Some(product) = group.product.clone() else {
        group.qty_sum = group.qty_units;
        return;
    };
    let pk = product.pack_size();
    group.qty_sum = group
        .qty_units
        .checked_div(pk)
        .unwrap_or_default()
        .normalize();

    if !group.is_partial_case() {
        let manual: Decimal = group
            .line_items
            .iter()
            .filter(|item| !item.has_origin_order())
            .map(case_quantity)
            .fold(Decimal::ZERO, |acc, q| acc.checked_add(q).unwrap_or(acc));
        group.qty_adjustments = manual.normalize();
        return;
    }

    let Some(quantity) = case_completion_quantity(group.qty_units, pk) else {
        return;
    };
    let unit_cost = product.u_price_cost.unwrap_or_default();
    let cost = unit_cost.multiply_quantity(quantity).unwrap_or_default();
    group.case_completion = Some(CaseCompletion { quantity, cost });

    if options.calculate_adjustments {
        let mut adjustment = LineItem::new(
            LineItemKind::Adjustment,
            format!("add {} {}", quantity.normalize(), Unit::Each),
        );
        adjustment.quantity = quantity;
        adjustment.selected_unit = Some(Unit::Each);
        adjustment.price = Some(unit_cost);
        adjustment.total = cost;
        group.line_items.push(adjustment);

        group.total_sum += cost;
        group.qty_units = group.qty_units.checked_add(quantity).unwrap_or(group.qty_units);
        group.qty_sum = quantity
            .checked_div(pk)
            .and_then(|cases| group.qty_sum.checked_add(cases))
            .unwrap_or(group.qty_sum)
            .round();
        summary.adjustment_total += cost;
    }
}
