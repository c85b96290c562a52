// Monthly report: totals, balance and per-category breakdowns for one month

use crate::db::Store;
use crate::error::Result;
use crate::model::{format_amount, Kind, MonthPeriod, Totals};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    pub period: MonthPeriod,
    pub totals: Totals,
    pub income_categories: BTreeMap<String, f64>,
    pub expense_categories: BTreeMap<String, f64>,
    pub currency: String,
}

impl MonthlyReport {
    /// Queries every aggregate for `period`, bounded by the month's true
    /// first and last day.
    pub fn generate(store: &Store, period: MonthPeriod, currency: &str) -> Result<Self> {
        let range = period.range();

        let totals = store.sum_by_kind_in_range(range)?;
        let income_categories = store.sum_by_category_in_range(Kind::Income, range)?;
        let expense_categories = store.sum_by_category_in_range(Kind::Expense, range)?;

        debug!(
            period = %period,
            income = totals.income,
            expense = totals.expense,
            "generated monthly report"
        );

        Ok(Self {
            period,
            totals,
            income_categories,
            expense_categories,
            currency: currency.to_string(),
        })
    }

    pub fn balance(&self) -> f64 {
        self.totals.balance()
    }

    pub fn categories(&self, kind: Kind) -> &BTreeMap<String, f64> {
        match kind {
            Kind::Income => &self.income_categories,
            Kind::Expense => &self.expense_categories,
        }
    }
}

impl fmt::Display for MonthlyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let money = |value: f64| format_amount(value, &self.currency);

        writeln!(f, "{} Monthly Report", self.period)?;
        writeln!(f, "Total Income: {}", money(self.totals.income))?;
        writeln!(f, "Total Expense: {}", money(self.totals.expense))?;
        writeln!(f, "Balance: {}", money(self.balance()))?;

        for kind in Kind::ALL {
            writeln!(f)?;
            writeln!(f, "{} Categories:", kind.label())?;
            for (category, total) in self.categories(kind) {
                writeln!(f, "  {}: {}", category, money(*total))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionDraft;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded_store() -> (TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("report.db")).unwrap();

        let rows = [
            (Kind::Income, "Salary", 5000.0, date(2024, 3, 1)),
            (Kind::Expense, "Rent", 1500.0, date(2024, 3, 5)),
            (Kind::Expense, "Rent", 1400.0, date(2024, 2, 5)),
        ];
        for (kind, category, amount, on) in rows {
            store
                .create(&TransactionDraft::new(kind, category, amount, on).unwrap())
                .unwrap();
        }

        (dir, store)
    }

    #[test]
    fn test_march_report() {
        let (_dir, store) = seeded_store();
        let period = MonthPeriod::new(2024, 3).unwrap();

        let report = MonthlyReport::generate(&store, period, "TL").unwrap();

        assert_eq!(report.totals.income, 5000.0);
        assert_eq!(report.totals.expense, 1500.0);
        assert_eq!(report.balance(), 3500.0);
        assert_eq!(report.income_categories.get("Salary"), Some(&5000.0));
        assert_eq!(report.expense_categories.get("Rent"), Some(&1500.0));
        assert_eq!(report.expense_categories.len(), 1);

        let text = report.to_string();
        assert_eq!(
            text,
            "2024-03 Monthly Report\n\
             Total Income: 5000.00 TL\n\
             Total Expense: 1500.00 TL\n\
             Balance: 3500.00 TL\n\
             \n\
             Income Categories:\n  Salary: 5000.00 TL\n\
             \n\
             Expense Categories:\n  Rent: 1500.00 TL\n"
        );
    }

    #[test]
    fn test_empty_month() {
        let (_dir, store) = seeded_store();
        let period = MonthPeriod::new(2023, 7).unwrap();

        let report = MonthlyReport::generate(&store, period, "").unwrap();

        assert_eq!(report.balance(), 0.0);
        assert!(report.income_categories.is_empty());
        assert!(report.expense_categories.is_empty());

        let text = report.to_string();
        assert!(text.contains("Total Income: 0.00\n"));
        assert!(text.contains("Total Expense: 0.00\n"));
        assert!(text.contains("Balance: 0.00\n"));
        assert!(text.ends_with("Income Categories:\n\nExpense Categories:\n"));
    }

    #[test]
    fn test_last_day_of_short_months_included() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("edges.db")).unwrap();

        for on in [date(2024, 4, 30), date(2024, 2, 29), date(2023, 2, 28)] {
            store
                .create(&TransactionDraft::new(Kind::Expense, "Bills", 10.0, on).unwrap())
                .unwrap();
        }
        // Belongs to May, not April
        store
            .create(&TransactionDraft::new(Kind::Expense, "Bills", 99.0, date(2024, 5, 1)).unwrap())
            .unwrap();

        for (year, month) in [(2024, 4), (2024, 2), (2023, 2)] {
            let period = MonthPeriod::new(year, month).unwrap();
            let report = MonthlyReport::generate(&store, period, "TL").unwrap();
            assert_eq!(report.totals.expense, 10.0, "{}", period);
        }
    }

    #[test]
    fn test_negative_balance_formatting() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("neg.db")).unwrap();
        store
            .create(&TransactionDraft::new(Kind::Expense, "Car", 250.5, date(2024, 6, 2)).unwrap())
            .unwrap();

        let report =
            MonthlyReport::generate(&store, MonthPeriod::new(2024, 6).unwrap(), "TL").unwrap();
        assert!(report.to_string().contains("Balance: -250.50 TL\n"));
    }
}
