// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use finance_tracker::config::{DEFAULT_CURRENCY, DEFAULT_DB_PATH, DEFAULT_LOG_FILE};
use finance_tracker::logging::{parse_log_level, setup_logging};
use finance_tracker::{export_csv, MonthPeriod, MonthlyReport, Settings, Store};

/// Track personal income and expenses in a local SQLite file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database (created on first run).
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    db_path: PathBuf,

    /// Currency label printed after amounts; empty for none.
    #[arg(long, default_value = DEFAULT_CURRENCY)]
    currency: String,

    /// Optional JSON theme file overriding the default colours.
    #[arg(long)]
    theme: Option<PathBuf>,

    /// File receiving log output.
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// One of: off, error, warn, info, debug, trace.
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the monthly report for YEAR and MONTH (1-12).
    Report { year: String, month: String },
    /// Write every transaction to a CSV file.
    Export { path: PathBuf },
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_file, parse_log_level(&args.log_level))?;

    let settings = Settings::resolve(args.db_path, &args.currency, args.theme.as_deref())?;
    let store = Store::open(&settings.db_path)
        .with_context(|| format!("Failed to open database {}", settings.db_path.display()))?;
    info!(db = %settings.db_path.display(), "started");

    let result = match args.command {
        None => run_ui_mode(store, &settings),
        Some(Command::Report { year, month }) => run_report(&store, &settings, &year, &month),
        Some(Command::Export { path }) => run_export(&store, &path),
    };

    if let Err(err) = &result {
        error!(error = %format!("{:#}", err), "exiting with error");
    }
    result
}

fn run_report(store: &Store, settings: &Settings, year: &str, month: &str) -> Result<()> {
    let period = match MonthPeriod::parse(year, month) {
        Ok(period) => period,
        Err(err) => {
            eprintln!("{}: {}", err.title(), err);
            std::process::exit(2);
        }
    };

    let report = MonthlyReport::generate(store, period, &settings.currency)?;
    print!("{}", report);

    Ok(())
}

fn run_export(store: &Store, path: &Path) -> Result<()> {
    let transactions = store.list_all()?;
    let written = export_csv(path, &transactions)?;
    info!(written, path = %path.display(), "exported transactions");
    println!("✓ Exported {} transactions to {}", written, path.display());

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(store: Store, settings: &Settings) -> Result<()> {
    let controller = finance_tracker::Controller::new(store, &settings.currency)?;
    let mut app = ui::App::new(controller, &settings.theme);
    ui::run_ui(&mut app)?;

    info!("UI closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_store: Store, _settings: &Settings) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: finance-tracker report <YEAR> <MONTH>");
    std::process::exit(1);
}
