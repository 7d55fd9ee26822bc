//! SQLite-backed `KeyValueSlot`.

use super::{KeyValueSlot, PersistenceResult};
use crate::db::migrations::apply_migrations;
use crate::db::{open_db, open_db_in_memory, DbResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Stores each slot as one row of the `kv_slots` table.
pub struct SqliteKeyValueSlot {
    conn: Connection,
}

impl SqliteKeyValueSlot {
    /// Wraps an existing connection, applying any pending migrations first.
    pub fn try_new(mut conn: Connection) -> DbResult<Self> {
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Opens (or creates) a slot database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a slot database that lives only as long as this value.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueSlot for SqliteKeyValueSlot {
    fn read(&self, key: &str) -> PersistenceResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> PersistenceResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKeyValueSlot;
    use crate::persistence::KeyValueSlot;

    #[test]
    fn write_overwrites_previous_value() {
        let slot = SqliteKeyValueSlot::open_in_memory().unwrap();
        assert_eq!(slot.read("k").unwrap(), None);

        slot.write("k", "first").unwrap();
        slot.write("k", "second").unwrap();

        assert_eq!(slot.read("k").unwrap().as_deref(), Some("second"));
        let rows: i64 = slot
            .connection()
            .query_row("SELECT COUNT(*) FROM kv_slots;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
