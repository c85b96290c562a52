use std::path::Path;
use std::process::{Command, Output};

use anyhow::Result;
use chrono::NaiveDate;
use finance_tracker::{Kind, Store, TransactionDraft};

fn run(dir: &Path, args: &[&str]) -> Result<Output> {
    let binary_path = env!("CARGO_BIN_EXE_finance-tracker");

    let output = Command::new(binary_path)
        .arg("--db-path")
        .arg(dir.join("finance.db"))
        .arg("--log-file")
        .arg(dir.join("finance.log"))
        .args(args)
        .output()?;

    Ok(output)
}

fn seed(dir: &Path) -> Result<()> {
    let store = Store::open(dir.join("finance.db"))?;
    let on = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
    store.create(&TransactionDraft::new(Kind::Income, "Salary", 5000.0, on(1))?)?;
    store.create(&TransactionDraft::new(Kind::Expense, "Rent", 1500.0, on(5))?)?;
    Ok(())
}

#[test]
fn test_report_prints_month() -> Result<()> {
    let dir = tempfile::tempdir()?;
    seed(dir.path())?;

    let output = run(dir.path(), &["report", "2024", "3"])?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("2024-03 Monthly Report"));
    assert_eq!(lines.next(), Some("Total Income: 5000.00 TL"));
    assert_eq!(lines.next(), Some("Total Expense: 1500.00 TL"));
    assert_eq!(lines.next(), Some("Balance: 3500.00 TL"));
    assert!(stdout.contains("  Salary: 5000.00 TL"));
    assert!(stdout.contains("  Rent: 1500.00 TL"));

    Ok(())
}

#[test]
fn test_report_rejects_bad_month() -> Result<()> {
    let dir = tempfile::tempdir()?;

    for month in ["13", "0", "march"] {
        let output = run(dir.path(), &["report", "2024", month])?;

        assert_eq!(output.status.code(), Some(2));
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid Input"));
    }

    Ok(())
}

#[test]
fn test_export_writes_csv() -> Result<()> {
    let dir = tempfile::tempdir()?;
    seed(dir.path())?;
    let csv_path = dir.path().join("out.csv");

    let output = run(dir.path(), &["export", csv_path.to_str().unwrap()])?;
    assert!(output.status.success());

    let text = std::fs::read_to_string(&csv_path)?;
    assert_eq!(
        text,
        "id,type,category,amount,date\n\
         2,expense,Rent,1500.0,2024-03-05\n\
         1,income,Salary,5000.0,2024-03-01\n"
    );

    Ok(())
}
