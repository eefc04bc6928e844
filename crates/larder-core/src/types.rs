//! # Domain Types
//!
//! Line items and orders as the data store persists them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │ WholesaleOrder  │   │ ProductSnapshot │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  unf, upc_code  │       │
//! │  │  line_items ─┐  │   │  line_items ─┐  │   │  ws_price (CS)  │       │
//! │  └──────────────┼──┘   └──────────────┼──┘   │  u_price  (EA)  │       │
//! │                 ▼                     ▼      │  *_cost, pk     │       │
//! │           ┌───────────────────────────────┐  └────────▲────────┘       │
//! │           │ LineItem                      │           │                │
//! │           │  kind, quantity, selected_unit│  data.product              │
//! │           │  price, total, order_id ──────┼───────────┘                │
//! │           └───────────────────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `data.product` freezes the product's pricing and packaging at the time it
//! was added to the order, so later catalogue edits don't reprice old orders.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 800 bps = 8%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Unit
// =============================================================================

/// Unit of sale for a product line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Unit {
    /// A full case of `pk` each-units.
    #[default]
    #[serde(rename = "CS")]
    Case,
    /// A single retail unit.
    #[serde(rename = "EA")]
    Each,
}

impl Unit {
    pub fn code(&self) -> &'static str {
        match self {
            Unit::Case => "CS",
            Unit::Each => "EA",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Unit {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CS" | "CASE" => Ok(Unit::Case),
            "EA" | "EACH" => Ok(Unit::Each),
            other => Err(crate::error::ValidationError::InvalidFormat {
                field: "unit".to_string(),
                reason: format!("unknown unit '{}', expected CS or EA", other),
            }),
        }
    }
}

// =============================================================================
// Line Item Kind
// =============================================================================

/// How a line item participates in order totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum LineItemKind {
    /// A physical product; counts toward the subtotal.
    #[default]
    Product,
    /// Discount, surcharge or case-completion charge; taxed with products.
    Adjustment,
    /// A recorded tax line. Informational, excluded from every sum.
    Tax,
    /// Money received, usually negative.
    Payment,
    /// Store credit applied, usually negative.
    Credit,
}

// =============================================================================
// Product Snapshot
// =============================================================================

/// Pricing and packaging of a product, frozen into a line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSnapshot {
    /// Distributor item number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unf: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upc_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Member price per case.
    #[serde(default, with = "crate::money::lenient")]
    #[ts(as = "Option<f64>")]
    pub ws_price: Option<Money>,

    /// Member price per each. Blank when the product only sells by the case.
    #[serde(default, with = "crate::money::lenient")]
    #[ts(as = "Option<f64>")]
    pub u_price: Option<Money>,

    /// Supplier cost per case.
    #[serde(default, with = "crate::money::lenient")]
    #[ts(as = "Option<f64>")]
    pub ws_price_cost: Option<Money>,

    /// Supplier cost per each.
    #[serde(default, with = "crate::money::lenient")]
    #[ts(as = "Option<f64>")]
    pub u_price_cost: Option<Money>,

    /// Each-units per case.
    #[serde(default, with = "lenient_decimal")]
    #[ts(as = "Option<f64>")]
    pub pk: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Unit the product is sold in when switching is not possible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<Unit>,
}

impl ProductSnapshot {
    /// Grouping identity for wholesale orders: `unf` followed by `upc_code`.
    pub fn identity(&self) -> String {
        format!(
            "{}{}",
            self.unf.as_deref().unwrap_or_default(),
            self.upc_code.as_deref().unwrap_or_default()
        )
    }

    /// Pack size with missing, zero or negative values read as 1.
    pub fn pack_size(&self) -> Decimal {
        match self.pk {
            Some(pk) if pk > Decimal::ZERO => pk,
            _ => Decimal::ONE,
        }
    }

    /// True when the product can be sold both by the case and by the each.
    pub fn has_distinct_each_price(&self) -> bool {
        matches!(self.u_price, Some(each) if Some(each) != self.ws_price)
    }

    /// The unit a line is fixed to when switching is not allowed.
    pub fn default_unit(&self) -> Unit {
        self.unit_type.unwrap_or_default()
    }
}

/// Free-form data attached to a line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItemData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductSnapshot>,
}

// =============================================================================
// Line Item
// =============================================================================

fn default_quantity() -> Decimal {
    Decimal::ONE
}

// =============================================================================
// Lenient Decimal Fields
// =============================================================================

/// A decimal as it appears in a stored row.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl RawDecimal {
    fn into_decimal(self) -> Option<Decimal> {
        match self {
            RawDecimal::Number(n) => Decimal::from_f64(n),
            RawDecimal::Text(s) => Decimal::from_str(s.trim()).ok(),
            RawDecimal::Other(_) => None,
        }
    }
}

/// Optional decimals (`pk`): `null`, text that is not a number and values
/// outside the `Decimal` range all read as `None`.
mod lenient_decimal {
    use super::RawDecimal;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float_option::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
        Ok(Option::<RawDecimal>::deserialize(deserializer)?.and_then(RawDecimal::into_decimal))
    }
}

/// Line quantities: anything unreadable reads as 1.
mod quantity_or_one {
    use rust_decimal::Decimal;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        Ok(super::lenient_decimal::deserialize(deserializer)?.unwrap_or(Decimal::ONE))
    }
}

/// One row of an order's cart.
///
/// `total` is derived (see [`crate::pricing::line_total`]) but persisted so
/// the data store and printouts can read it without recomputing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub kind: LineItemKind,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_quantity", with = "quantity_or_one")]
    #[ts(as = "f64")]
    pub quantity: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_unit: Option<Unit>,

    /// Unit price at the time of selection. `None` when the entered price
    /// could not be read as a number.
    #[serde(default, with = "crate::money::lenient")]
    #[ts(as = "Option<f64>")]
    pub price: Option<Money>,

    /// Stored line total. `null` (a `NaN` written by the console) reads as zero.
    #[serde(default, with = "crate::money::or_zero")]
    #[ts(as = "f64")]
    pub total: Money,

    /// Retail order this wholesale line was pulled from. `None` for lines
    /// added by hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LineItemData>,
}

impl LineItem {
    /// A blank line of the given kind with a fresh id and quantity 1.
    pub fn new(kind: LineItemKind, description: impl Into<String>) -> Self {
        LineItem {
            id: Some(Uuid::new_v4().to_string()),
            kind,
            description: description.into(),
            quantity: Decimal::ONE,
            selected_unit: None,
            price: None,
            total: Money::zero(),
            order_id: None,
            data: None,
        }
    }

    /// A product line priced from its snapshot, in the product's default unit.
    pub fn from_product(product: ProductSnapshot, quantity: Decimal) -> Self {
        let unit = product.default_unit();
        let price = match unit {
            Unit::Each => product.u_price.or(product.ws_price),
            Unit::Case => product.ws_price,
        };
        let description = product.description.clone().unwrap_or_default();

        LineItem {
            quantity,
            selected_unit: Some(unit),
            price,
            data: Some(LineItemData {
                product: Some(product),
            }),
            ..LineItem::new(LineItemKind::Product, description)
        }
    }

    /// The attached product snapshot, if any.
    pub fn product(&self) -> Option<&ProductSnapshot> {
        self.data.as_ref().and_then(|d| d.product.as_ref())
    }

    /// Quantity used for pricing.
    ///
    /// Product lines read a non-positive stored quantity as 1. Other kinds
    /// keep their stored value since negative quantities express reductions.
    pub fn quantity(&self) -> Decimal {
        if self.kind == LineItemKind::Product && self.quantity <= Decimal::ZERO {
            Decimal::ONE
        } else {
            self.quantity
        }
    }

    /// True when the line may be switched between CS and EA.
    pub fn can_switch_unit(&self) -> bool {
        self.product()
            .map(ProductSnapshot::has_distinct_each_price)
            .unwrap_or(false)
    }

    /// The unit this line is priced and counted in.
    ///
    /// `selected_unit` when stored, otherwise the product's `unit_type`.
    /// Pricing and wholesale grouping both read the unit through here, so a
    /// line is never charged in one unit and ordered in the other.
    pub fn unit(&self) -> Unit {
        self.selected_unit
            .or_else(|| self.product().map(ProductSnapshot::default_unit))
            .unwrap_or_default()
    }

    /// True for lines pulled from a retail order.
    pub fn has_origin_order(&self) -> bool {
        self.order_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

// =============================================================================
// Orders
// =============================================================================

/// A member's retail order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// An order placed with a supplier, built from many retail orders' lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WholesaleOrder {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub line_items: Vec<LineItem>,
}
