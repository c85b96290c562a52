// Form/Table controller
// Two states: Idle (primary action adds) and Editing (primary action updates
// the remembered row). Every user action goes through here; the presentation
// layer only renders state and shows the returned notices.

use crate::chart::ChartData;
use crate::db::Store;
use crate::error::{FinanceError, Result, ValidationError};
use crate::model::{parse_amount, Kind, MonthPeriod, Transaction, TransactionDraft};
use crate::report::MonthlyReport;
use chrono::{Days, Local, Months, NaiveDate};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Editing { id: i64 },
}

impl Mode {
    pub fn primary_label(&self) -> &'static str {
        match self {
            Mode::Idle => "Add",
            Mode::Editing { .. } => "Update",
        }
    }

    pub fn selected_id(&self) -> Option<i64> {
        match self {
            Mode::Idle => None,
            Mode::Editing { id } => Some(*id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Kind,
    Category,
    Amount,
    Date,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Kind => FormField::Category,
            FormField::Category => FormField::Amount,
            FormField::Amount => FormField::Date,
            FormField::Date => FormField::Kind,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            FormField::Kind => FormField::Date,
            FormField::Category => FormField::Kind,
            FormField::Amount => FormField::Category,
            FormField::Date => FormField::Amount,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Kind => "Kind",
            FormField::Category => "Category",
            FormField::Amount => "Amount",
            FormField::Date => "Date",
        }
    }
}

/// Raw widget values of the entry form.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub kind: Kind,
    pub category: String,
    pub amount: String,
    pub date: NaiveDate,
}

impl Form {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            kind: Kind::Income,
            category: String::new(),
            amount: String::new(),
            date: today,
        }
    }

    pub fn from_transaction(tx: &Transaction) -> Self {
        Self {
            kind: tx.kind,
            category: tx.category.clone(),
            amount: tx.amount.to_string(),
            date: tx.date,
        }
    }

    /// Checks the form without touching storage.
    pub fn to_draft(&self) -> std::result::Result<TransactionDraft, ValidationError> {
        if self.category.trim().is_empty() || self.amount.trim().is_empty() {
            return Err(ValidationError::MissingFields);
        }
        let amount = parse_amount(&self.amount)?;
        TransactionDraft::new(self.kind, &self.category, amount, self.date)
    }

    /// Moves the picked date by whole days; out-of-range results are ignored.
    pub fn shift_days(&mut self, days: i64) {
        let step = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            self.date.checked_add_days(step)
        } else {
            self.date.checked_sub_days(step)
        };
        if let Some(date) = shifted {
            self.date = date;
        }
    }

    /// Moves the picked date by whole months, clamping to the target month's
    /// last day.
    pub fn shift_months(&mut self, months: i32) {
        let step = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.date.checked_add_months(step)
        } else {
            self.date.checked_sub_months(step)
        };
        if let Some(date) = shifted {
            self.date = date;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// A message the user must see before control returns to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: &str, message: &str) -> Self {
        Self::new(Level::Info, title, message)
    }

    pub fn warning(title: &str, message: &str) -> Self {
        Self::new(Level::Warning, title, message)
    }

    pub fn error(title: &str, message: &str) -> Self {
        Self::new(Level::Error, title, message)
    }

    fn new(level: Level, title: &str, message: &str) -> Self {
        Self {
            level,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<ValidationError> for Notice {
    fn from(err: ValidationError) -> Self {
        Notice::warning(err.title(), &err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletePrompt {
    NothingSelected(Notice),
    Confirm { id: i64, title: String, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Ready(MonthlyReport),
    Rejected(Notice),
}

pub struct Controller {
    store: Store,
    currency: String,
    mode: Mode,
    form: Form,
    transactions: Vec<Transaction>,
    chart: ChartData,
}

impl Controller {
    /// Loads the table and chart from storage, starting in `Idle`.
    pub fn new(store: Store, currency: &str) -> Result<Self> {
        let mut controller = Self {
            store,
            currency: currency.to_string(),
            mode: Mode::Idle,
            form: Form::blank(today()),
            transactions: Vec::new(),
            chart: ChartData::default(),
        };
        controller.reload()?;
        Ok(controller)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn chart(&self) -> &ChartData {
        &self.chart
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Table position of the row being edited.
    pub fn selected_index(&self) -> Option<usize> {
        let id = self.mode.selected_id()?;
        self.transactions.iter().position(|tx| tx.id == id)
    }

    /// Re-queries the table rows and the all-time chart totals.
    pub fn reload(&mut self) -> Result<()> {
        self.transactions = self.store.list_all()?;
        self.chart = ChartData::from_totals(&self.store.sum_by_kind()?, &self.currency);
        Ok(())
    }

    /// Selecting a table row switches to `Editing` and fills the form.
    pub fn select(&mut self, index: usize) -> bool {
        match self.transactions.get(index) {
            Some(tx) => {
                self.form = Form::from_transaction(tx);
                self.mode = Mode::Editing { id: tx.id };
                true
            }
            None => false,
        }
    }

    /// Resets the form to defaults and drops the selection.
    pub fn clear(&mut self) {
        self.form = Form::blank(today());
        self.mode = Mode::Idle;
    }

    /// Primary action: add in `Idle`, update the selected row in `Editing`.
    pub fn submit(&mut self) -> Result<Notice> {
        let draft = match self.form.to_draft() {
            Ok(draft) => draft,
            Err(err) => {
                warn!(error = %err, "rejected form input");
                return Ok(err.into());
            }
        };

        let notice = match self.mode {
            Mode::Idle => {
                let id = self.store.create(&draft)?;
                info!(id, kind = draft.kind.as_str(), "transaction added");
                Notice::info("Success", "Transaction added.")
            }
            Mode::Editing { id } => match self.store.update(id, &draft) {
                Ok(()) => {
                    info!(id, "transaction updated");
                    Notice::info("Success", "Transaction updated.")
                }
                Err(err) => self.recover(err)?,
            },
        };

        self.clear();
        self.reload()?;
        Ok(notice)
    }

    pub fn request_delete(&self) -> DeletePrompt {
        match self.mode.selected_id() {
            None => DeletePrompt::NothingSelected(Notice::warning(
                "No Selection",
                "Please select a transaction to delete.",
            )),
            Some(id) => DeletePrompt::Confirm {
                id,
                title: "Confirm".to_string(),
                message: format!("Delete transaction #{}? This cannot be undone.", id),
            },
        }
    }

    /// Runs after the user affirmed the delete prompt for `id`.
    pub fn confirm_delete(&mut self, id: i64) -> Result<Notice> {
        let notice = match self.store.delete(id) {
            Ok(()) => {
                info!(id, "transaction deleted");
                Notice::info("Success", "Transaction deleted.")
            }
            Err(err) => self.recover(err)?,
        };

        self.clear();
        self.reload()?;
        Ok(notice)
    }

    /// Validates the year/month text and builds the report. Nothing is
    /// queried for invalid input.
    pub fn monthly_report(&self, year: &str, month: &str) -> Result<ReportOutcome> {
        let period = match MonthPeriod::parse(year, month) {
            Ok(period) => period,
            Err(err) => {
                warn!(year, month, "rejected report period");
                return Ok(ReportOutcome::Rejected(err.into()));
            }
        };

        let report = MonthlyReport::generate(&self.store, period, &self.currency)?;
        Ok(ReportOutcome::Ready(report))
    }

    fn recover(&self, err: FinanceError) -> Result<Notice> {
        if !err.is_recoverable() {
            return Err(err);
        }
        warn!(error = %err, "action rejected");

        Ok(match err {
            FinanceError::Validation(err) => err.into(),
            _ => Notice::warning("Not Found", "The selected transaction no longer exists."),
        })
    }
}

/// Current local date, the date picker's default.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
