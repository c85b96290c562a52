use crate::error::{FinanceError, ValidationError};
use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Income/Expense classification of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub const ALL: [Kind; 2] = [Kind::Income, Kind::Expense];

    /// Value stored in the `type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Kind::Income => "Income",
            Kind::Expense => "Expense",
        }
    }

    pub fn toggle(self) -> Kind {
        match self {
            Kind::Income => Kind::Expense,
            Kind::Expense => Kind::Income,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Kind {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            other => Err(FinanceError::UnknownKind(other.to_string())),
        }
    }
}

impl ToSql for Kind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Kind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: FinanceError| FromSqlError::Other(Box::new(e)))
    }
}

/// A stored transaction row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
}

/// Field values for a create or a full-row update. Storage assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub kind: Kind,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl TransactionDraft {
    /// Builds a draft, trimming the category and rejecting blank categories
    /// and non-positive amounts.
    pub fn new(
        kind: Kind,
        category: &str,
        amount: f64,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let draft = Self {
            kind,
            category: category.trim().to_string(),
            amount,
            date,
        };
        draft.validate()?;
        Ok(draft)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ValidationError::InvalidAmount);
        }
        Ok(())
    }
}

/// Parses user-typed amount text. Blank input counts as a missing field.
pub fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(ValidationError::InvalidAmount),
    }
}

/// Formats an amount with two decimals and an optional currency suffix.
pub fn format_amount(value: f64, currency: &str) -> String {
    if currency.is_empty() {
        format!("{:.2}", value)
    } else {
        format!("{:.2} {}", value, currency)
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A calendar month, bounded by its true first and last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
    range: DateRange,
}

impl MonthPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        // Four-digit years keep `YYYY-MM-DD` text ordered in storage.
        if !(1..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidPeriod);
        }

        let start =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or(ValidationError::InvalidPeriod)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next_month
            .and_then(|d| d.pred_opt())
            .ok_or(ValidationError::InvalidPeriod)?;

        Ok(Self {
            year,
            month,
            range: DateRange { start, end },
        })
    }

    /// Parses the year and month text typed into the report dialog.
    pub fn parse(year: &str, month: &str) -> Result<Self, ValidationError> {
        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|_| ValidationError::InvalidPeriod)?;
        let month = month
            .trim()
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidPeriod)?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn last_day(&self) -> NaiveDate {
        self.range.end
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Sum of amounts per kind. A kind with no rows totals zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
}

impl Totals {
    pub fn get(&self, kind: Kind) -> f64 {
        match kind {
            Kind::Income => self.income,
            Kind::Expense => self.expense,
        }
    }

    pub fn add(&mut self, kind: Kind, amount: f64) {
        match kind {
            Kind::Income => self.income += amount,
            Kind::Expense => self.expense += amount,
        }
    }

    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}
