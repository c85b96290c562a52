use chrono::NaiveDate;
use finance_tracker::{
    FinanceError, Kind, MonthPeriod, MonthlyReport, Store, Totals, TransactionDraft,
};
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn open_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("finance.db")).unwrap();
    (dir, store)
}

fn add(store: &Store, kind: Kind, category: &str, amount: f64, on: NaiveDate) -> i64 {
    store
        .create(&TransactionDraft::new(kind, category, amount, on).unwrap())
        .unwrap()
}

#[test]
fn create_then_list_contains_exactly_one_match() {
    let (_dir, store) = open_store();
    let existing = add(&store, Kind::Income, "Salary", 100.0, date(2024, 1, 1));

    let id = add(&store, Kind::Expense, "Coffee", 3.75, date(2024, 1, 2));
    assert_ne!(id, existing);

    let all = store.list_all().unwrap();
    let matches: Vec<_> = all
        .iter()
        .filter(|tx| {
            tx.kind == Kind::Expense
                && tx.category == "Coffee"
                && tx.amount == 3.75
                && tx.date == date(2024, 1, 2)
        })
        .collect();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, id);
}

#[test]
fn update_replaces_row_and_leaves_others_alone() {
    let (_dir, store) = open_store();
    let target = add(&store, Kind::Expense, "Rent", 1500.0, date(2024, 3, 5));
    let other = add(&store, Kind::Income, "Salary", 5000.0, date(2024, 3, 1));
    let other_before = store.get(other).unwrap();

    let replacement = TransactionDraft::new(Kind::Income, "Refund", 42.0, date(2024, 4, 2)).unwrap();
    store.update(target, &replacement).unwrap();

    let updated = store.get(target).unwrap();
    assert_eq!(updated.kind, Kind::Income);
    assert_eq!(updated.category, "Refund");
    assert_eq!(updated.amount, 42.0);
    assert_eq!(updated.date, date(2024, 4, 2));
    assert_eq!(store.get(other).unwrap(), other_before);
}

#[test]
fn delete_removes_exactly_one_row() {
    let (_dir, store) = open_store();
    let keep = add(&store, Kind::Income, "Salary", 5000.0, date(2024, 3, 1));
    let gone = add(&store, Kind::Expense, "Rent", 1500.0, date(2024, 3, 5));
    let before = store.list_all().unwrap().len();

    store.delete(gone).unwrap();

    assert!(matches!(store.get(gone), Err(FinanceError::NotFound { id }) if id == gone));
    assert_eq!(store.list_all().unwrap().len(), before - 1);
    assert!(store.get(keep).is_ok());
}

#[test]
fn sum_by_kind_matches_arithmetic_sum() {
    let (_dir, store) = open_store();
    assert_eq!(store.sum_by_kind().unwrap(), Totals::default());

    let rows = [
        (Kind::Income, 10.25),
        (Kind::Income, 4.75),
        (Kind::Expense, 8.5),
        (Kind::Expense, 1.5),
        (Kind::Expense, 100.0),
    ];
    for (i, (kind, amount)) in rows.iter().enumerate() {
        add(&store, *kind, "Misc", *amount, date(2020 + i as i32, 6, 15));
    }

    let totals = store.sum_by_kind().unwrap();
    assert_eq!(totals.income, 15.0);
    assert_eq!(totals.expense, 110.0);
}

#[test]
fn example_march_report() {
    let (_dir, store) = open_store();
    add(&store, Kind::Income, "Salary", 5000.0, date(2024, 3, 1));
    add(&store, Kind::Expense, "Rent", 1500.0, date(2024, 3, 5));

    let report =
        MonthlyReport::generate(&store, MonthPeriod::new(2024, 3).unwrap(), "TL").unwrap();

    assert_eq!(report.totals.income, 5000.0);
    assert_eq!(report.totals.expense, 1500.0);
    assert_eq!(report.balance(), 3500.0);
    assert_eq!(
        report.income_categories.iter().collect::<Vec<_>>(),
        vec![(&"Salary".to_string(), &5000.0)]
    );
    assert_eq!(
        report.expense_categories.iter().collect::<Vec<_>>(),
        vec![(&"Rent".to_string(), &1500.0)]
    );
}

#[test]
fn month_end_rows_belong_to_their_month() {
    let (_dir, store) = open_store();
    add(&store, Kind::Expense, "Utilities", 80.0, date(2024, 6, 30));
    add(&store, Kind::Expense, "Utilities", 70.0, date(2025, 2, 28));
    add(&store, Kind::Income, "Interest", 5.0, date(2024, 2, 29));

    let june = MonthlyReport::generate(&store, MonthPeriod::new(2024, 6).unwrap(), "").unwrap();
    assert_eq!(june.totals.expense, 80.0);

    let feb_2025 =
        MonthlyReport::generate(&store, MonthPeriod::new(2025, 2).unwrap(), "").unwrap();
    assert_eq!(feb_2025.totals.expense, 70.0);

    let feb_2024 =
        MonthlyReport::generate(&store, MonthPeriod::new(2024, 2).unwrap(), "").unwrap();
    assert_eq!(feb_2024.totals.income, 5.0);
    assert_eq!(feb_2024.income_categories.get("Interest"), Some(&5.0));
}

#[test]
fn data_survives_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("persist.db");

    let id = {
        let store = Store::open(&path).unwrap();
        add(&store, Kind::Income, "Salary", 5000.0, date(2024, 3, 1))
    };

    let store = Store::open(&path).unwrap();
    assert_eq!(store.get(id).unwrap().category, "Salary");
}
