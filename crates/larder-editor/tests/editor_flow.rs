//! End-to-end edit sessions against orders loaded from JSON.

use larder_core::{
    BalanceStatus, CoreError, GroupingOptions, Money, Order, TaxRate, Unit, WholesaleOrder,
};
use larder_editor::{EditorError, ErrorCode, OrderEditor, RowAction, Selection, WholesaleEditor};
use rust_decimal::Decimal;

fn retail_order() -> Order {
    serde_json::from_value(serde_json::json!({
        "id": "ord-77",
        "member_name": "Pat",
        "line_items": [
            {
                "kind": "product",
                "description": "Crushed Tomatoes",
                "quantity": 2,
                "selected_unit": "CS",
                "price": 10.0,
                "total": 20.0,
                "data": { "product": {
                    "unf": "1100", "description": "Crushed Tomatoes",
                    "ws_price": 10.0, "u_price": 4.0, "pk": 6
                } }
            },
            {
                "kind": "product",
                "description": "Salt",
                "quantity": 1,
                "price": 3.5,
                "total": 3.5,
                "data": { "product": {
                    "unf": "1200", "description": "Salt",
                    "ws_price": 3.5, "unit_type": "EA"
                } }
            },
            { "kind": "payment", "description": "Cash", "quantity": 1, "price": -10, "total": -10 }
        ]
    }))
    .unwrap()
}

#[test]
fn retail_session_keeps_totals_current() {
    let mut editor = OrderEditor::new(retail_order(), TaxRate::from_bps(1000));
    assert_eq!(editor.totals().subtotal, Money::from_cents(2350));
    assert_eq!(editor.totals().taxes, Money::from_cents(235));

    editor.update_unit(0, Unit::Each).unwrap();
    editor.update_quantity_text(0, "5").unwrap();
    assert_eq!(editor.line_items()[0].total, Money::from_cents(2000));

    editor.update_quantity_text(1, "0").unwrap();
    assert_eq!(editor.line_items()[1].quantity, Decimal::ONE);

    // 2000 + 350 = 2350, tax 235, paid 1000
    assert_eq!(editor.totals().order_total, Money::from_cents(2585));
    assert_eq!(
        editor.balance_status(),
        BalanceStatus::Due(Money::from_cents(1585))
    );

    let order = editor.into_order();
    assert_eq!(order.id, "ord-77");
    assert_eq!(order.line_items[0].selected_unit, Some(Unit::Each));
}

#[test]
fn locked_unit_is_rejected_with_business_code() {
    let mut editor = OrderEditor::new(retail_order(), TaxRate::zero());
    let err: EditorError = editor.update_unit(1, Unit::Case).unwrap_err().into();
    assert_eq!(err.code(), ErrorCode::BusinessLogic);
    assert_eq!(editor.line_items()[1].unit(), Unit::Each);
}

#[test]
fn overpayment_becomes_credit_owed() {
    let mut editor = OrderEditor::new(retail_order(), TaxRate::zero());
    editor.update_price_text(2, "-30").unwrap();
    assert_eq!(
        editor.balance_status(),
        BalanceStatus::CreditOwed(Money::from_cents(650))
    );
}

#[test]
fn selection_actions_validate_before_editing() {
    let mut editor = OrderEditor::new(retail_order(), TaxRate::zero());

    let err = editor
        .apply_to_selection(&Selection::new([0, 1]), RowAction::SetUnit(Unit::Each))
        .unwrap_err();
    assert!(matches!(err, CoreError::UnitNotSwitchable { .. }));
    assert_eq!(editor.line_items()[0].unit(), Unit::Case);

    let err = editor
        .apply_to_selection(&Selection::new([1, 9]), RowAction::Remove)
        .unwrap_err();
    assert!(matches!(err, CoreError::LineItemNotFound { index: 9, len: 3 }));
    assert_eq!(editor.line_items().len(), 3);

    let removed = editor
        .apply_to_selection(&Selection::new([2, 0]), RowAction::Remove)
        .unwrap();
    assert_eq!(removed, 2);
    assert_eq!(editor.line_items().len(), 1);
    assert_eq!(editor.line_items()[0].description, "Salt");
    assert_eq!(editor.totals().balance, Money::from_cents(350));
}

#[test]
fn bulk_quantity_clamps() {
    let mut editor = OrderEditor::new(retail_order(), TaxRate::zero());
    editor
        .apply_to_selection(&Selection::new([0, 1]), RowAction::SetQuantity(Decimal::from(-2)))
        .unwrap();
    assert_eq!(editor.totals().subtotal, Money::from_cents(1350));
}

#[test]
fn wholesale_session_completes_cases() {
    let order: WholesaleOrder = serde_json::from_value(serde_json::json!({
        "id": "ws-3",
        "vendor": "Valley Foods",
        "line_items": [
            {
                "kind": "product", "description": "Black Beans",
                "quantity": 8, "selected_unit": "EA", "order_id": "ord-1",
                "data": { "product": {
                    "unf": "4410", "description": "Black Beans", "pk": 12,
                    "ws_price": 30, "u_price": 3,
                    "ws_price_cost": 24, "u_price_cost": 2.5
                } }
            },
            {
                "kind": "product", "description": "Black Beans",
                "quantity": 6, "selected_unit": "EA", "order_id": "ord-2",
                "data": { "product": {
                    "unf": "4410", "description": "Black Beans", "pk": 12,
                    "ws_price": 30, "u_price": 3,
                    "ws_price_cost": 24, "u_price_cost": 2.5
                } }
            }
        ]
    }))
    .unwrap();

    let mut editor = WholesaleEditor::new(order, GroupingOptions::default());
    let group = &editor.summary().groups[0];
    assert_eq!(group.qty_units, Decimal::from(14));
    assert_eq!(group.case_completion.unwrap().quantity, Decimal::from(10));
    assert_eq!(editor.summary().adjustment_total, Money::zero());

    editor.set_calculate_adjustments(true);
    assert_eq!(editor.summary().groups[0].qty_sum, Decimal::from(2));
    assert_eq!(editor.summary().adjustment_total, Money::from_cents(2500));

    editor.update_quantity(1, Decimal::from(4)).unwrap();
    let group = &editor.summary().groups[0];
    assert!(group.case_completion.is_none());
    assert_eq!(group.qty_sum, Decimal::ONE);
    assert_eq!(editor.summary().order_total, Money::from_cents(2400));
}
