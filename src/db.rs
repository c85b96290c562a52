use crate::error::{FinanceError, Result};
use crate::model::{DateRange, Kind, Totals, Transaction, TransactionDraft};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// Transaction repository backed by a single SQLite file.
///
/// No connection is held between calls: every operation opens its own
/// session and the connection is closed when the session goes out of scope,
/// whether the operation succeeded or not.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Opens the database file, creating it and the schema on first run.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { path: path.into() };
        store.with_session(setup_database)?;
        debug!(path = %store.path.display(), "database ready");
        Ok(store)
    }

    fn with_session<T>(&self, op: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = Connection::open(&self.path)?;
        op(&conn)
    }

    pub fn create(&self, draft: &TransactionDraft) -> Result<i64> {
        draft.validate()?;

        self.with_session(|conn| {
            conn.execute(
                "INSERT INTO transactions (type, category, amount, date) VALUES (?1, ?2, ?3, ?4)",
                params![draft.kind, draft.category.trim(), draft.amount, draft.date],
            )?;
            let id = conn.last_insert_rowid();
            debug!(id, kind = draft.kind.as_str(), "inserted transaction");
            Ok(id)
        })
    }

    /// Replaces every field of an existing row.
    pub fn update(&self, id: i64, draft: &TransactionDraft) -> Result<()> {
        draft.validate()?;

        self.with_session(|conn| {
            let changed = conn.execute(
                "UPDATE transactions SET type = ?1, category = ?2, amount = ?3, date = ?4 WHERE id = ?5",
                params![draft.kind, draft.category.trim(), draft.amount, draft.date, id],
            )?;
            if changed == 0 {
                return Err(FinanceError::not_found(id));
            }
            debug!(id, "updated transaction");
            Ok(())
        })
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.with_session(|conn| {
            let changed = conn.execute("DELETE FROM transactions WHERE id = ?1", [id])?;
            if changed == 0 {
                return Err(FinanceError::not_found(id));
            }
            debug!(id, "deleted transaction");
            Ok(())
        })
    }

    pub fn get(&self, id: i64) -> Result<Transaction> {
        self.with_session(|conn| {
            conn.query_row(
                "SELECT id, type, category, amount, date FROM transactions WHERE id = ?1",
                [id],
                transaction_from_row,
            )
            .optional()?
            .ok_or(FinanceError::not_found(id))
        })
    }

    /// All rows, newest date first. Rows sharing a date keep insertion order.
    pub fn list_all(&self) -> Result<Vec<Transaction>> {
        self.with_session(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, type, category, amount, date
                 FROM transactions
                 ORDER BY date DESC, id ASC",
            )?;

            let transactions = stmt
                .query_map([], transaction_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            debug!(count = transactions.len(), "listed transactions");
            Ok(transactions)
        })
    }

    pub fn count(&self) -> Result<i64> {
        self.with_session(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
            Ok(count)
        })
    }

    /// Totals over every stored row.
    pub fn sum_by_kind(&self) -> Result<Totals> {
        self.with_session(|conn| {
            let mut stmt =
                conn.prepare("SELECT type, SUM(amount) FROM transactions GROUP BY type")?;
            let rows = stmt.query_map([], kind_total_from_row)?;
            collect_totals(rows)
        })
    }

    /// Totals over rows dated within `range`, both ends inclusive.
    pub fn sum_by_kind_in_range(&self, range: DateRange) -> Result<Totals> {
        self.with_session(|conn| {
            let mut stmt = conn.prepare(
                "SELECT type, SUM(amount)
                 FROM transactions
                 WHERE date BETWEEN ?1 AND ?2
                 GROUP BY type",
            )?;
            let rows = stmt.query_map(params![range.start, range.end], kind_total_from_row)?;
            collect_totals(rows)
        })
    }

    /// Per-category totals for one kind within `range`, both ends inclusive.
    pub fn sum_by_category_in_range(
        &self,
        kind: Kind,
        range: DateRange,
    ) -> Result<BTreeMap<String, f64>> {
        self.with_session(|conn| {
            let mut stmt = conn.prepare(
                "SELECT category, SUM(amount)
                 FROM transactions
                 WHERE type = ?1 AND date BETWEEN ?2 AND ?3
                 GROUP BY category",
            )?;

            let totals = stmt
                .query_map(params![kind, range.start, range.end], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, Option<f64>>(1)?))
                })?
                .map(|row| row.map(|(category, total)| (category, total.unwrap_or(0.0))))
                .collect::<rusqlite::Result<BTreeMap<_, _>>>()?;

            Ok(totals)
        })
    }
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // WAL mode for crash recovery
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            type TEXT NOT NULL,
            category TEXT NOT NULL,
            amount REAL NOT NULL,
            date TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date)",
        [],
    )?;

    Ok(())
}

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        kind: row.get(1)?,
        category: row.get(2)?,
        amount: row.get(3)?,
        date: row.get(4)?,
    })
}

fn kind_total_from_row(row: &Row<'_>) -> rusqlite::Result<(Kind, Option<f64>)> {
    Ok((row.get(0)?, row.get(1)?))
}

fn collect_totals(
    rows: impl Iterator<Item = rusqlite::Result<(Kind, Option<f64>)>>,
) -> Result<Totals> {
    let mut totals = Totals::default();
    for row in rows {
        let (kind, total) = row?;
        totals.add(kind, total.unwrap_or(0.0));
    }
    Ok(totals)
}
