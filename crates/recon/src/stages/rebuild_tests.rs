//! Tests for the pure reconstruction planning in the rebuild stage.

use chrono::TimeZone;
use proptest::prelude::*;
use rust_decimal_macros::dec;

use super::*;

fn seed(amount: Decimal, category: &str, reference_id: Option<&str>) -> TransactionDoc {
    TransactionDoc {
        object_id: None,
        id: Uuid::new_v4().to_string(),
        transaction_number: "TXN-2023-0007".to_string(),
        date: None,
        transaction_type: "debit".to_string(),
        mode: Some("Card".to_string()),
        account_id: Some("acc-bank".to_string()),
        account_name: Some("Bank".to_string()),
        party_id: None,
        party_name: None,
        amount,
        category: category.to_string(),
        notes: None,
        reference_type: Some("invoice".to_string()),
        reference_id: reference_id.map(str::to_string),
        created_by: Some("cashier-1".to_string()),
        created_at: Some(bson::DateTime::from_chrono(
            chrono::Utc.with_ymd_and_hms(2023, 6, 15, 10, 30, 0).unwrap(),
        )),
        is_deleted: true,
        deleted_at: Some(bson::DateTime::now()),
        deleted_by: Some(REBUILD_ACTOR.to_string()),
    }
}

fn account(id: &str, name: &str, account_type: &str) -> AccountDoc {
    AccountDoc {
        object_id: None,
        id: id.to_string(),
        name: name.to_string(),
        account_type: account_type.to_string(),
        opening_balance: Decimal::ZERO,
        current_balance: Decimal::ZERO,
        created_at: None,
        created_by: None,
        is_deleted: false,
    }
}

fn invoice(id: &str) -> InvoiceDoc {
    InvoiceDoc {
        object_id: None,
        id: id.to_string(),
        invoice_number: Some("INV-0042".to_string()),
        customer_id: Some("cust-9".to_string()),
        customer_name: Some("Aisha".to_string()),
        walk_in_name: None,
        paid_amount: dec!(500),
        is_deleted: false,
    }
}

#[test]
fn test_group_by_invoice_preserves_first_seen_order() {
    let tombstones = vec![
        seed(dec!(100), DEBIT_CATEGORY, Some("inv-2")),
        seed(dec!(200), DEBIT_CATEGORY, Some("inv-1")),
        seed(dec!(300), DEBIT_CATEGORY, Some("inv-2")),
    ];
    let groups = group_by_invoice(tombstones);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].invoice_id, "inv-2");
    assert_eq!(groups[0].seeds.len(), 2);
    assert_eq!(groups[0].seeds[0].amount, dec!(100));
    assert_eq!(groups[0].seeds[1].amount, dec!(300));
    assert_eq!(groups[1].invoice_id, "inv-1");
    assert_eq!(groups[1].seeds.len(), 1);
}

#[test]
fn test_group_by_invoice_drops_unreferenced_tombstones() {
    let tombstones = vec![
        seed(dec!(100), DEBIT_CATEGORY, None),
        seed(dec!(200), DEBIT_CATEGORY, Some("")),
        seed(dec!(300), DEBIT_CATEGORY, Some("inv-1")),
    ];
    let groups = group_by_invoice(tombstones);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].invoice_id, "inv-1");
    assert_eq!(groups[0].seeds.len(), 1);
}

#[test]
fn test_revenue_legs_are_not_seeds() {
    assert!(is_revenue_leg(CREDIT_CATEGORY));
    assert!(is_revenue_leg("Gold Exchange Income"));
    assert!(!is_revenue_leg(DEBIT_CATEGORY));
    assert!(!is_revenue_leg(""));

    let credit_leg = seed(dec!(500), CREDIT_CATEGORY, Some("inv-1"));
    assert!(!is_payment_seed(&credit_leg));

    let debit_leg = seed(dec!(500), DEBIT_CATEGORY, Some("inv-1"));
    assert!(is_payment_seed(&debit_leg));
}

#[test]
fn test_non_positive_amounts_are_not_seeds() {
    assert!(!is_payment_seed(&seed(Decimal::ZERO, DEBIT_CATEGORY, None)));
    assert!(!is_payment_seed(&seed(dec!(-25), DEBIT_CATEGORY, None)));
    assert!(is_payment_seed(&seed(dec!(0.01), DEBIT_CATEGORY, None)));
}

#[test]
fn test_plan_pair_builds_both_legs() {
    let payment_seed = seed(dec!(500.00), DEBIT_CATEGORY, Some("inv-1"));
    let invoice = invoice("inv-1");
    let bank = account("acc-bank", "Bank", "asset");
    let revenue = account("acc-sales", "Sales Income", "income");
    let event_at = chrono::Utc.with_ymd_and_hms(2023, 6, 15, 10, 30, 0).unwrap();
    let numbers = numbering::pair_after(event_at.year(), 41);

    let pair = plan_pair(&payment_seed, &invoice, &bank, &revenue, &numbers, event_at);
    let stamp = bson::DateTime::from_chrono(event_at);

    assert_eq!(pair.debit.transaction_number, "TXN-2023-0042");
    assert_eq!(pair.debit.transaction_type, "debit");
    assert_eq!(pair.debit.mode.as_deref(), Some("Card"));
    assert_eq!(pair.debit.account_id.as_deref(), Some("acc-bank"));
    assert_eq!(pair.debit.account_name.as_deref(), Some("Bank"));
    assert_eq!(pair.debit.party_id.as_deref(), Some("cust-9"));
    assert_eq!(pair.debit.party_name.as_deref(), Some("Aisha"));
    assert_eq!(pair.debit.amount, dec!(500.00));
    assert_eq!(pair.debit.category, DEBIT_CATEGORY);
    assert_eq!(
        pair.debit.notes.as_deref(),
        Some("Payment for invoice INV-0042")
    );
    assert_eq!(pair.debit.reference_type.as_deref(), Some("invoice"));
    assert_eq!(pair.debit.reference_id.as_deref(), Some("inv-1"));
    assert_eq!(pair.debit.created_by.as_deref(), Some("cashier-1"));
    assert_eq!(pair.debit.date, Some(stamp));
    assert_eq!(pair.debit.created_at, Some(stamp));
    assert!(!pair.debit.is_deleted);
    assert_eq!(pair.debit.deleted_at, None);
    assert_eq!(pair.debit.deleted_by, None);

    assert_eq!(pair.credit.transaction_number, "TXN-2023-0043");
    assert_eq!(pair.credit.transaction_type, "credit");
    assert_eq!(pair.credit.account_id.as_deref(), Some("acc-sales"));
    assert_eq!(pair.credit.account_name.as_deref(), Some("Sales Income"));
    assert_eq!(pair.credit.amount, dec!(500.00));
    assert_eq!(pair.credit.category, CREDIT_CATEGORY);
    assert_eq!(
        pair.credit.notes.as_deref(),
        Some("Revenue for invoice INV-0042")
    );
    assert_eq!(pair.credit.reference_id.as_deref(), Some("inv-1"));
    assert_eq!(pair.credit.created_by.as_deref(), Some("cashier-1"));
    assert_ne!(pair.debit.id, pair.credit.id);

    // Asset debited and income credited both increase.
    assert_eq!(pair.debit_delta, dec!(500.00));
    assert_eq!(pair.credit_delta, dec!(500.00));
}

#[test]
fn test_plan_pair_applies_defaults() {
    let mut payment_seed = seed(dec!(120), DEBIT_CATEGORY, Some("inv-1"));
    payment_seed.mode = None;
    payment_seed.created_by = None;

    let mut inv = invoice("inv-1");
    inv.invoice_number = None;
    inv.customer_name = Some(String::new());
    inv.walk_in_name = Some("Walk-in".to_string());

    let cash = account("acc-cash", "Cash", "asset");
    let revenue = account("acc-sales", "Sales Income", "income");
    let event_at = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
    let numbers = numbering::pair_after(event_at.year(), 0);

    let pair = plan_pair(&payment_seed, &inv, &cash, &revenue, &numbers, event_at);

    assert_eq!(pair.debit.mode.as_deref(), Some("Cash"));
    assert_eq!(pair.debit.created_by.as_deref(), Some(SYSTEM_ACTOR));
    assert_eq!(pair.credit.created_by.as_deref(), Some(SYSTEM_ACTOR));
    assert_eq!(pair.debit.notes.as_deref(), Some("Payment for invoice N/A"));
    assert_eq!(pair.credit.notes.as_deref(), Some("Revenue for invoice N/A"));
    assert_eq!(pair.debit.party_name.as_deref(), Some("Walk-in"));
}

#[test]
fn test_plan_pair_deltas_follow_account_type() {
    let payment_seed = seed(dec!(200), DEBIT_CATEGORY, Some("inv-1"));
    let inv = invoice("inv-1");
    let revenue = account("acc-sales", "Sales Income", "income");
    let event_at = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
    let numbers = numbering::pair_after(event_at.year(), 0);

    // Debiting a credit-normal account decreases it.
    let advance = account("acc-adv", "Customer Advance", "liability");
    let pair = plan_pair(&payment_seed, &inv, &advance, &revenue, &numbers, event_at);
    assert_eq!(pair.debit_delta, dec!(-200));
    assert_eq!(pair.credit_delta, dec!(200));

    // A non-canonical payment account type falls back to asset.
    let odd = account("acc-odd", "Drawer", "checking");
    let pair = plan_pair(&payment_seed, &inv, &odd, &revenue, &numbers, event_at);
    assert_eq!(pair.debit_delta, dec!(200));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// **Property: a planned pair is always balanced**
    ///
    /// *For any* positive seed amount, both legs carry exactly that
    /// amount, reference the same invoice, and take distinct consecutive
    /// numbers.
    #[test]
    fn prop_planned_pair_is_balanced(
        cents in 1i64..100_000_000,
        live_count in 0u64..100_000,
    ) {
        let amount = Decimal::new(cents, 2);
        let payment_seed = seed(amount, DEBIT_CATEGORY, Some("inv-1"));
        let inv = invoice("inv-1");
        let bank = account("acc-bank", "Bank", "asset");
        let revenue = account("acc-sales", "Sales Income", "income");
        let event_at = chrono::Utc.with_ymd_and_hms(2023, 6, 15, 10, 30, 0).unwrap();
        let numbers = numbering::pair_after(event_at.year(), live_count);

        let pair = plan_pair(&payment_seed, &inv, &bank, &revenue, &numbers, event_at);

        prop_assert_eq!(pair.debit.amount, amount);
        prop_assert_eq!(pair.credit.amount, amount);
        prop_assert_eq!(
            pair.debit.reference_id.as_deref(),
            pair.credit.reference_id.as_deref()
        );
        prop_assert_ne!(&pair.debit.transaction_number, &pair.credit.transaction_number);
        // An asset/income pair moves both balances up by the amount.
        prop_assert_eq!(pair.debit_delta, amount);
        prop_assert_eq!(pair.credit_delta, amount);
    }

    /// **Property: grouping never invents or loses referenced seeds**
    #[test]
    fn prop_grouping_preserves_referenced_seeds(
        references in proptest::collection::vec(
            proptest::option::of("inv-[0-9]{1,2}"),
            0..40,
        ),
    ) {
        let tombstones: Vec<TransactionDoc> = references
            .iter()
            .map(|reference| seed(dec!(10), DEBIT_CATEGORY, reference.as_deref()))
            .collect();
        let referenced = references.iter().flatten().count();

        let groups = group_by_invoice(tombstones);
        let regrouped: usize = groups.iter().map(|group| group.seeds.len()).sum();

        prop_assert_eq!(regrouped, referenced);
        for group in &groups {
            for group_seed in &group.seeds {
                prop_assert_eq!(group_seed.reference_id.as_deref(), Some(group.invoice_id.as_str()));
            }
        }
    }
}
