//! End-to-end pricing scenarios on rows shaped like the data store's.

use larder_core::pricing::{effective_unit_price, recompute_all, OrderTotals};
use larder_core::wholesale::{group_line_items, GroupingOptions};
use larder_core::{BalanceStatus, LineItem, LineItemKind, Money, TaxRate, Unit};
use rust_decimal::Decimal;
use serde_json::json;

fn tomato_row(unit: &str) -> serde_json::Value {
    json!({
        "kind": "product",
        "description": "Crushed Tomatoes 28oz",
        "quantity": 3,
        "selected_unit": unit,
        "price": 10,
        "total": 0,
        "data": {
            "product": {
                "unf": "60210",
                "upc_code": "0042",
                "ws_price": 10,
                "u_price": 4,
                "pk": 6,
                "size": "28 OZ",
                "unit_type": "CS"
            }
        }
    })
}

#[test]
fn case_line_prices_at_case_price() {
    let mut items: Vec<LineItem> = serde_json::from_value(json!([tomato_row("CS")])).unwrap();
    recompute_all(&mut items);

    assert_eq!(effective_unit_price(&items[0]), Some(Money::from_cents(1000)));
    assert_eq!(items[0].total, Money::from_cents(3000));
}

#[test]
fn each_line_prices_at_each_price() {
    let mut items: Vec<LineItem> = serde_json::from_value(json!([tomato_row("EA")])).unwrap();
    recompute_all(&mut items);

    assert_eq!(items[0].unit(), Unit::Each);
    assert_eq!(effective_unit_price(&items[0]), Some(Money::from_cents(400)));
    assert_eq!(items[0].total, Money::from_cents(1200));
}

#[test]
fn full_order_balance() {
    let rows = json!([
        tomato_row("CS"),
        { "kind": "product", "description": "Bulk rice", "quantity": 2, "price": 35, "total": 0 },
        { "kind": "adjustment", "description": "Member discount", "quantity": 1, "price": -10, "total": 0 },
        { "kind": "tax", "description": "Sales tax", "quantity": 1, "price": 7.2, "total": 0 },
        { "kind": "payment", "description": "Check #1042", "quantity": 1, "price": -50, "total": 0 },
        { "kind": "credit", "description": "Returned jars", "quantity": 1, "price": "-2.50", "total": 0 }
    ]);
    let mut items: Vec<LineItem> = serde_json::from_value(rows).unwrap();
    recompute_all(&mut items);

    let totals = OrderTotals::compute(&items, TaxRate::from_bps(800));
    assert_eq!(totals.subtotal, Money::from_cents(10000));
    assert_eq!(totals.adjustments, Money::from_cents(-1000));
    assert_eq!(totals.taxes, Money::from_cents(720));
    assert_eq!(totals.order_total, Money::from_cents(9720));
    assert_eq!(totals.payments, Money::from_cents(-5000));
    assert_eq!(totals.credits, Money::from_cents(-250));
    assert_eq!(totals.balance, Money::from_cents(4470));
    assert_eq!(totals.balance_status(), BalanceStatus::Due(Money::from_cents(4470)));
}

#[test]
fn fixed_each_line_agrees_between_retail_and_wholesale() {
    // each price equals case price, so the unit cannot be switched
    let row = json!({
        "kind": "product",
        "description": "Lentils",
        "quantity": 6,
        "selected_unit": "EA",
        "order_id": "ord-4",
        "data": { "product": {
            "unf": "7001", "ws_price": 5, "u_price": 5, "pk": 12, "ws_price_cost": 24
        } }
    });
    let mut items: Vec<LineItem> = serde_json::from_value(json!([row])).unwrap();
    recompute_all(&mut items);

    assert_eq!(items[0].unit(), Unit::Each);
    assert_eq!(items[0].total, Money::from_cents(3000));

    let summary = group_line_items(&items, GroupingOptions::default());
    assert_eq!(summary.groups[0].qty_units, Decimal::from(6));
    assert_eq!(summary.groups[0].qty_sum, Decimal::new(5, 1));
    assert_eq!(summary.groups[0].total_sum, Money::from_cents(1200));
}

#[test]
fn garbage_rows_still_load_and_total() {
    let rows = json!([
        { "kind": "product", "description": "Honey", "quantity": 2, "price": 3, "total": null },
        { "kind": "adjustment", "description": "Jar deposit", "quantity": null, "price": 0.25, "total": "NaN" },
        { "kind": "adjustment", "description": "Typo", "quantity": "two", "price": 1e27, "total": 1e27 },
        { "kind": "payment", "description": "Cash", "quantity": 1, "price": -6, "total": -6 }
    ]);
    let order: larder_core::Order = serde_json::from_value(json!({ "id": "ord-5", "line_items": rows })).unwrap();
    assert_eq!(order.line_items.len(), 4);

    // stored totals as loaded: unreadable ones are zero
    let stored = OrderTotals::compute(&order.line_items, TaxRate::zero());
    assert_eq!(stored.subtotal, Money::zero());
    assert_eq!(stored.balance, Money::from_cents(-600));

    let mut items = order.line_items;
    recompute_all(&mut items);
    assert_eq!(items[1].quantity, Decimal::ONE);
    assert_eq!(items[2].quantity, Decimal::ONE);
    assert_eq!(items[2].price, None);

    let totals = OrderTotals::compute(&items, TaxRate::zero());
    assert_eq!(totals.subtotal, Money::from_cents(600));
    assert_eq!(totals.adjustments, Money::from_cents(25));
    assert_eq!(totals.balance, Money::from_cents(25));
}

#[test]
fn unreadable_price_totals_zero() {
    let rows = json!([
        { "kind": "adjustment", "description": "Bottle deposit", "quantity": 4, "price": "n/a" }
    ]);
    let mut items: Vec<LineItem> = serde_json::from_value(rows).unwrap();
    recompute_all(&mut items);

    assert_eq!(items[0].price, None);
    assert_eq!(items[0].total, Money::zero());
}

#[test]
fn line_item_survives_persisted_round_trip() {
    let mut items: Vec<LineItem> = serde_json::from_value(json!([tomato_row("EA")])).unwrap();
    recompute_all(&mut items);
    let original = items.remove(0);

    let stored = serde_json::to_string(&original).unwrap();
    let restored: LineItem = serde_json::from_str(&stored).unwrap();

    assert_eq!(restored.quantity, original.quantity);
    assert_eq!(restored.price, original.price);
    assert_eq!(restored.total, original.total);
    assert_eq!(restored.selected_unit, original.selected_unit);
    assert_eq!(restored.kind, original.kind);
    assert_eq!(restored, original);
}

#[test]
fn persisted_json_uses_row_field_names() {
    let mut item = LineItem::new(LineItemKind::Payment, "Cash");
    item.price = Some(Money::from_cents(-2000));
    item.total = Money::from_cents(-2000);

    let value = serde_json::to_value(&item).unwrap();
    assert_eq!(value["kind"], "payment");
    assert_eq!(value["price"], json!(-20.0));
    assert_eq!(value["total"], json!(-20.0));
    assert_eq!(value["quantity"], json!(1.0));
}

#[test]
fn wholesale_fourteen_each_of_a_twelve_pack() {
    let rows = json!([
        {
            "kind": "product",
            "description": "Oat Milk",
            "quantity": 8,
            "selected_unit": "EA",
            "order_id": "ord-100",
            "data": { "product": {
                "unf": "88001", "upc_code": "777", "ws_price": 36, "u_price": 3.5,
                "ws_price_cost": 30, "u_price_cost": 2.5, "pk": 12
            } }
        },
        {
            "kind": "product",
            "description": "Oat Milk",
            "quantity": 6,
            "selected_unit": "EA",
            "order_id": "ord-101",
            "data": { "product": {
                "unf": "88001", "upc_code": "777", "ws_price": 36, "u_price": 3.5,
                "ws_price_cost": 30, "u_price_cost": 2.5, "pk": 12
            } }
        }
    ]);
    let items: Vec<LineItem> = serde_json::from_value(rows).unwrap();

    let summary = group_line_items(
        &items,
        GroupingOptions {
            calculate_adjustments: true,
        },
    );
    assert_eq!(summary.groups.len(), 1);

    let group = &summary.groups[0];
    assert_eq!(group.key, "88001777");
    let completion = group.case_completion.unwrap();
    assert_eq!(completion.quantity, Decimal::from(10));
    assert_eq!(completion.cost, Money::from_cents(2500));
    assert_eq!(group.qty_sum, Decimal::from(2));
    assert!(((group.qty_units) % Decimal::from(12)).is_zero());

    // 8/12 × $30 = $20.00, 6/12 × $30 = $15.00, completion $25.00
    assert_eq!(summary.product_total, Money::from_cents(3500));
    assert_eq!(summary.adjustment_total, Money::from_cents(2500));
    assert_eq!(summary.order_total, Money::from_cents(6000));
}
