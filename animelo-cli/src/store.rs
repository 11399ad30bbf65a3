/// SQLite-backed rating store.
///
/// One table keyed by the external catalog ID. Every write runs in
/// autocommit, so it is on disk when the call returns.
use std::path::Path;

use animelo_core::{
    Item, ItemId, NewItem, OrderPolicy, RatingError, RatingStore, Result, BASELINE_RATING,
};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

/// Declared column types, checked against `PRAGMA table_info` on open.
const COLUMNS: [(&str, &str); 5] = [
    ("identity", "INTEGER"),
    ("display_name", "TEXT"),
    ("status", "TEXT"),
    ("rating", "INTEGER"),
    ("comparisons", "INTEGER"),
];

const SELECT_ITEM: &str = "SELECT identity, display_name, status, rating, comparisons FROM items";

pub struct SqliteStore {
    conn: Connection,
    eligible_status: String,
}

fn store_err(e: rusqlite::Error) -> RatingError {
    RatingError::StoreUnavailable(e.to_string())
}

impl SqliteStore {
    /// Open the store, creating the file and table if needed. Used by import.
    pub fn open_or_create(path: &Path, eligible_status: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| RatingError::StoreUnavailable(format!("open {}: {e}", path.display())))?;
        Self::init(conn, eligible_status, true)
    }

    /// Open a store that must already exist. Used by rating and standings.
    pub fn open_existing(path: &Path, eligible_status: &str) -> Result<Self> {
        if !path.is_file() {
            return Err(RatingError::StoreUnavailable(format!(
                "no rating database at {} (run `animelo import mal <file>` first)",
                path.display()
            )));
        }
        let conn = Connection::open(path)
            .map_err(|e| RatingError::StoreUnavailable(format!("open {}: {e}", path.display())))?;
        Self::init(conn, eligible_status, false)
    }

    #[cfg(test)]
    pub fn open_in_memory(eligible_status: &str) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(store_err)?;
        Self::init(conn, eligible_status, true)
    }

    fn init(conn: Connection, eligible_status: &str, create: bool) -> Result<Self> {
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
            ",
        )
        .map_err(store_err)?;

        if create {
            conn.execute_batch(
                "
                CREATE TABLE IF NOT EXISTS items (
                    identity     INTEGER NOT NULL PRIMARY KEY,
                    display_name TEXT    NOT NULL,
                    status       TEXT    NOT NULL,
                    rating       INTEGER NOT NULL DEFAULT 1500,
                    comparisons  INTEGER NOT NULL DEFAULT 0
                );
                CREATE INDEX IF NOT EXISTS idx_items_status_comparisons
                    ON items (status, comparisons);
                ",
            )
            .map_err(store_err)?;
        }

        validate_schema(&conn)?;
        tracing::debug!(eligible_status, "rating store opened");

        Ok(SqliteStore {
            conn,
            eligible_status: eligible_status.to_string(),
        })
    }

    /// Decode one row of `SELECT_ITEM`.
    fn item_from_row(&self, row: &Row<'_>) -> rusqlite::Result<Item> {
        let status: String = row.get("status")?;
        Ok(Item {
            id: row.get("identity")?,
            title: row.get("display_name")?,
            eligible: status == self.eligible_status,
            status,
            rating: row.get("rating")?,
            comparisons: row.get("comparisons")?,
        })
    }

    /// Total and eligible item counts.
    pub fn counts(&self) -> Result<(usize, usize)> {
        self.conn
            .query_row(
                "SELECT COUNT(*), COALESCE(SUM(status = ?1), 0) FROM items",
                params![self.eligible_status],
                |row| Ok((row.get::<_, i64>(0)? as usize, row.get::<_, i64>(1)? as usize)),
            )
            .map_err(store_err)
    }

    /// Decisions recorded over the whole table. Each decision bumps two
    /// rows, including ineligible ones rated before their status changed.
    pub fn total_decisions(&self) -> Result<u64> {
        self.conn
            .query_row("SELECT COALESCE(SUM(comparisons), 0) FROM items", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|sum| sum as u64 / 2)
            .map_err(store_err)
    }
}

/// Fail fast when the file holds some other `items` table.
fn validate_schema(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare("PRAGMA table_info(items)").map_err(store_err)?;
    let columns: Vec<(String, String)> = stmt
        .query_map([], |row| Ok((row.get("name")?, row.get("type")?)))
        .map_err(store_err)?
        .collect::<rusqlite::Result<_>>()
        .map_err(store_err)?;

    if columns.is_empty() {
        return Err(RatingError::StoreUnavailable(
            "database has no `items` table".to_string(),
        ));
    }
    if columns.len() != COLUMNS.len() {
        return Err(RatingError::StoreUnavailable(format!(
            "`items` table has {} columns, expected {}",
            columns.len(),
            COLUMNS.len()
        )));
    }
    for (name, ty) in COLUMNS {
        match columns.iter().find(|(n, _)| n == name) {
            None => {
                return Err(RatingError::StoreUnavailable(format!(
                    "`items` table is missing column `{name}`"
                )))
            }
            Some((_, actual)) if !actual.eq_ignore_ascii_case(ty) => {
                return Err(RatingError::StoreUnavailable(format!(
                    "column `{name}` has type {actual}, expected {ty}"
                )))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

impl RatingStore for SqliteStore {
    fn get(&self, id: ItemId) -> Result<Item> {
        self.conn
            .query_row(&format!("{SELECT_ITEM} WHERE identity = ?1"), params![id], |row| {
                self.item_from_row(row)
            })
            .optional()
            .map_err(store_err)?
            .ok_or(RatingError::NotFound(id))
    }

    fn put(&mut self, item: NewItem) -> Result<Item> {
        let inserted = self.conn.execute(
            "INSERT INTO items (identity, display_name, status, rating, comparisons)
             VALUES (?1, ?2, ?3, ?4, 0)",
            params![item.id, item.title, item.status, BASELINE_RATING],
        );
        match inserted {
            Ok(_) => Ok(item.into_item(&self.eligible_status)),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(RatingError::DuplicateIdentity(item.id))
            }
            Err(e) => Err(store_err(e)),
        }
    }

    fn update_rating(&mut self, id: ItemId, rating: i64) -> Result<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE items SET rating = ?1, comparisons = comparisons + 1 WHERE identity = ?2",
                params![rating, id],
            )
            .map_err(store_err)?;
        if changed == 0 {
            return Err(RatingError::NotFound(id));
        }
        Ok(())
    }

    fn sample_eligible(&mut self, n: usize, policy: OrderPolicy) -> Result<Vec<Item>> {
        let order = match policy {
            OrderPolicy::LeastComparedFirst => "comparisons ASC, RANDOM()",
            OrderPolicy::HighestRatedFirst => "rating DESC, identity ASC",
        };
        let limit = i64::try_from(n).unwrap_or(i64::MAX);

        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_ITEM} WHERE status = ?1 ORDER BY {order} LIMIT ?2"))
            .map_err(store_err)?;
        let items = stmt
            .query_map(params![self.eligible_status, limit], |row| self.item_from_row(row))
            .map_err(store_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(store_err)?;
        Ok(items)
    }
}
