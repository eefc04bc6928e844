//! # Line-Item Pricing
//!
//! Derives every order-level figure from a list of line items.
//!
//! ## Derivation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LineItem ──► effective_unit_price ──► line_total ──► item.total        │
//! │                                                                         │
//! │  items ─┬─ product ────► subtotal ─────┐                                │
//! │         ├─ adjustment ─► adjustments ──┼─► taxes = rate × (sub + adj)   │
//! │         │                              └─► order_total = taxes+sub+adj  │
//! │         ├─ payment ────► payments ─────┐                                │
//! │         ├─ credit ─────► credits ──────┼─► balance = total+credits+pay  │
//! │         └─ tax ────────► (not summed)  │                                │
//! │                                        ▼                                │
//! │                         Due / CreditOwed / Settled                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a pure function of its inputs. Callers re-run
//! [`OrderTotals::compute`] explicitly after each edit.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{LineItem, LineItemKind, TaxRate, Unit};

// =============================================================================
// Per-Item Pricing
// =============================================================================

/// Resolves the unit price a line is charged at.
///
/// - `EA` (see [`LineItem::unit`]) with a product that has an each price → `u_price`
/// - any other line with a product → `ws_price`
/// - no product → the line's own `price`
///
/// `None` means no usable price; [`line_total`] treats it as zero.
pub fn effective_unit_price(item: &LineItem) -> Option<Money> {
    match item.product() {
        Some(product) => match (item.unit(), product.u_price) {
            (Unit::Each, Some(each)) => Some(each),
            _ => product.ws_price,
        },
        None => item.price,
    }
}

/// `quantity × effective unit price`, or zero when there is no usable price
/// or the product overflows.
pub fn line_total(item: &LineItem) -> Money {
    effective_unit_price(item)
        .and_then(|price| price.multiply_quantity(item.quantity()))
        .unwrap_or_default()
}

/// Writes [`line_total`] back into `item.total`.
pub fn recompute_total(item: &mut LineItem) {
    item.total = line_total(item);
}

/// Recomputes `total` on every line.
pub fn recompute_all(items: &mut [LineItem]) {
    items.iter_mut().for_each(recompute_total);
}

// =============================================================================
// Order-Level Sums
// =============================================================================

/// Sum of `total` over the lines of one kind.
pub fn sum_kind(items: &[LineItem], kind: LineItemKind) -> Money {
    items
        .iter()
        .filter(|item| item.kind == kind)
        .map(|item| item.total)
        .sum()
}

pub fn subtotal(items: &[LineItem]) -> Money {
    sum_kind(items, LineItemKind::Product)
}

pub fn adjustments_total(items: &[LineItem]) -> Money {
    sum_kind(items, LineItemKind::Adjustment)
}

pub fn payments_total(items: &[LineItem]) -> Money {
    sum_kind(items, LineItemKind::Payment)
}

pub fn credits_total(items: &[LineItem]) -> Money {
    sum_kind(items, LineItemKind::Credit)
}

/// Tax owed on products and adjustments together.
pub fn taxes(subtotal: Money, adjustments: Money, rate: TaxRate) -> Money {
    (subtotal + adjustments).calculate_tax(rate)
}

// =============================================================================
// Order Totals
// =============================================================================

/// All derived money figures for one order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    #[ts(as = "f64")]
    pub subtotal: Money,
    #[ts(as = "f64")]
    pub adjustments: Money,
    #[ts(as = "f64")]
    pub taxes: Money,
    /// `taxes + subtotal + adjustments`
    #[ts(as = "f64")]
    pub order_total: Money,
    #[ts(as = "f64")]
    pub payments: Money,
    #[ts(as = "f64")]
    pub credits: Money,
    /// `order_total + credits + payments`; positive means the member owes.
    #[ts(as = "f64")]
    pub balance: Money,
}

impl OrderTotals {
    /// Derives totals from the stored `total` of each line.
    ///
    /// Line totals are read as stored; run [`recompute_all`] first when the
    /// lines came from an untrusted source.
    ///
    /// ## Example
    /// ```rust
    /// use larder_core::money::Money;
    /// use larder_core::pricing::OrderTotals;
    /// use larder_core::types::{LineItem, LineItemKind, TaxRate};
    ///
    /// let mut groceries = LineItem::new(LineItemKind::Product, "Groceries");
    /// groceries.total = Money::from_cents(10000);
    /// let mut discount = LineItem::new(LineItemKind::Adjustment, "Volunteer discount");
    /// discount.total = Money::from_cents(-1000);
    ///
    /// let totals = OrderTotals::compute(&[groceries, discount], TaxRate::from_bps(800));
    /// assert_eq!(totals.taxes.cents(), 720);
    /// assert_eq!(totals.order_total.cents(), 9720);
    /// ```
    pub fn compute(items: &[LineItem], rate: TaxRate) -> Self {
        let subtotal = subtotal(items);
        let adjustments = adjustments_total(items);
        let taxes = taxes(subtotal, adjustments, rate);
        let order_total = taxes + subtotal + adjustments;
        let payments = payments_total(items);
        let credits = credits_total(items);

        OrderTotals {
            subtotal,
            adjustments,
            taxes,
            order_total,
            payments,
            credits,
            balance: order_total + credits + payments,
        }
    }

    pub fn balance_status(&self) -> BalanceStatus {
        BalanceStatus::from_balance(self.balance)
    }
}

// =============================================================================
// Balance Status
// =============================================================================

/// What the signed balance means for the member.
///
/// Sent to the console as `{"status": "due", "amount": 15.85}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", content = "amount", rename_all = "snake_case")]
pub enum BalanceStatus {
    /// Member owes this amount.
    Due(#[ts(as = "f64")] Money),
    /// Co-op owes the member this amount.
    CreditOwed(#[ts(as = "f64")] Money),
    Settled,
}

impl BalanceStatus {
    /// Classifies a balance; amounts are always reported as magnitudes.
    pub fn from_balance(balance: Money) -> Self {
        if balance.is_positive() {
            BalanceStatus::Due(balance)
        } else if balance.is_negative() {
            BalanceStatus::CreditOwed(balance.abs())
        } else {
            BalanceStatus::Settled
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BalanceStatus::Due(_) => "Balance Due",
            BalanceStatus::CreditOwed(_) => "Credit Owed",
            BalanceStatus::Settled => "Settled",
        }
    }

    /// Magnitude shown next to the label.
    pub fn amount(&self) -> Money {
        match self {
            BalanceStatus::Due(amount) | BalanceStatus::CreditOwed(amount) => *amount,
            BalanceStatus::Settled => Money::zero(),
        }
    }
}

impl std::fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label(), self.amount())
    }
}
