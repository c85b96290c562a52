// Personal Finance Tracker - Core Library
// Exposes storage, controller, report and chart logic to the TUI binary and tests

pub mod chart;
pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod export;
pub mod logging;
pub mod model;
pub mod report;
pub mod theme;

// Re-export commonly used types
pub use chart::{ChartBar, ChartData};
pub use config::Settings;
pub use controller::{
    Controller, DeletePrompt, Form, FormField, Level, Mode, Notice, ReportOutcome,
};
pub use db::{setup_database, Store};
pub use error::{FinanceError, Result, ValidationError};
pub use export::{export_csv, write_csv};
pub use model::{
    format_amount, parse_amount, DateRange, Kind, MonthPeriod, Totals, Transaction,
    TransactionDraft,
};
pub use report::MonthlyReport;
pub use theme::{parse_hex, Theme};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
