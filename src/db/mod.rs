mod schema;

use anyhow::{Context, Result};
use rusqlite::types::{Type, ValueRef};
use rusqlite::{params, Connection, OpenFlags, Row};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::{SalesRecord, SalesTable, FIELDS};

pub(crate) struct Database {
    conn: Connection,
}

/// Open the store read-only, read every sales row, and close it again.
///
/// A missing file or a missing `sales` relation is an error; an empty
/// relation is not.
pub(crate) fn load_all(path: &Path) -> Result<SalesTable> {
    let table = Database::open_existing(path)?
        .load_all()
        .with_context(|| format!("Failed to load sales from {}", path.display()))?;
    tracing::info!(records = table.len(), path = %path.display(), "loaded sales table");
    Ok(table)
}

impl Database {
    /// Open (creating if needed) a store for writing and bring its schema up to date.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        // Rollback journal, not WAL: read-only loads must not need -shm/-wal files
        conn.execute_batch("PRAGMA journal_mode=DELETE;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "opened store for writing");
        Ok(db)
    }

    /// Open an existing store without write access. Never creates the file.
    pub(crate) fn open_existing(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Sales store not found: {} (run `salesboard init` to create it)",
                path.display()
            );
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open database: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "opened store read-only");
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database, or one created by another tool: CREATE IF NOT EXISTS is safe for both
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        if current > schema::CURRENT_VERSION {
            anyhow::bail!(
                "Store schema version {current} is newer than supported ({})",
                schema::CURRENT_VERSION
            );
        }
        if current < schema::CURRENT_VERSION {
            // Version 1 is the only schema so far; its DDL is idempotent
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute("DELETE FROM schema_version", [])?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::info!(from = current, to = schema::CURRENT_VERSION, "upgraded store schema");
        }

        Ok(())
    }

    /// Insert the example rows if the relation is empty. Returns how many were inserted.
    pub(crate) fn seed_examples(&mut self) -> Result<usize> {
        if self.record_count()? > 0 {
            return Ok(0);
        }
        let records: Vec<SalesRecord> = schema::EXAMPLE_ROWS
            .iter()
            .map(|&(category, amount, date)| {
                SalesRecord::new(category.into(), Decimal::from(amount), date.into())
            })
            .collect();
        let count = self.insert_records_batch(&records)?;
        tracing::info!(count, "seeded example sales rows");
        Ok(count)
    }

    // ── Sales ─────────────────────────────────────────────────

    pub(crate) fn insert_record(&self, record: &SalesRecord) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO sales (category, amount, date) VALUES (?1, ?2, ?3)",
            params![record.category, amount_to_real(record.amount)?, record.date],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn insert_records_batch(&mut self, records: &[SalesRecord]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        for record in records {
            tx.execute(
                "INSERT INTO sales (category, amount, date) VALUES (?1, ?2, ?3)",
                params![record.category, amount_to_real(record.amount)?, record.date],
            )?;
        }
        tx.commit()?;
        Ok(records.len())
    }

    pub(crate) fn record_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM sales", [], |row| row.get(0))?)
    }

    /// Read the whole relation in insertion order, then close the connection.
    ///
    /// The connection is closed whether or not the read succeeded.
    pub(crate) fn load_all(self) -> Result<SalesTable> {
        let records = self.read_records();
        self.conn
            .close()
            .map_err(|(_, e)| e)
            .context("Failed to close database")?;
        Ok(SalesTable::new(records?))
    }

    fn read_records(&self) -> Result<Vec<SalesRecord>> {
        let sql = format!("SELECT id, {} FROM sales ORDER BY id", FIELDS.join(", "));
        let mut stmt = self
            .conn
            .prepare(&sql)
            .context("Failed to read sales relation")?;
        let rows = stmt.query_map([], |row| {
            Ok(SalesRecord {
                id: Some(row.get(0)?),
                category: row.get(1)?,
                amount: amount_from_row(row, 2)?,
                date: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

/// SQLite's dynamic typing lets `amount` hold an INTEGER, REAL or TEXT cell.
fn amount_from_row(row: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    match row.get_ref(idx)? {
        ValueRef::Integer(i) => Ok(Decimal::from(i)),
        ValueRef::Real(f) => Decimal::from_f64(f).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                Type::Real,
                format!("amount {f} is out of range").into(),
            )
        }),
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })?;
            Decimal::from_str(text.trim()).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        }
        other => Err(rusqlite::Error::InvalidColumnType(
            idx,
            "amount".into(),
            other.data_type(),
        )),
    }
}

fn amount_to_real(amount: Decimal) -> Result<f64> {
    amount
        .to_f64()
        .ok_or_else(|| anyhow::anyhow!("Amount {amount} cannot be stored as REAL"))
}
