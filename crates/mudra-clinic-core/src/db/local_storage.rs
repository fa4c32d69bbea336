//! Key/value operations on the SQLite-backed local storage.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult, KeyValueStore};

impl KeyValueStore for Database {
    fn get_item(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn set_item(&mut self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> DbResult<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?", [key])?;
        Ok(())
    }
}

impl Database {
    /// All stored keys, sorted.
    pub fn keys(&self) -> DbResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM local_storage ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Remove every stored key.
    pub fn clear(&mut self) -> DbResult<()> {
        self.conn.execute("DELETE FROM local_storage", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_set_and_get() {
        let mut db = setup_db();

        db.set_item("mudraActiveClinic", "dental").unwrap();
        assert_eq!(
            db.get_item("mudraActiveClinic").unwrap(),
            Some("dental".into())
        );
        assert_eq!(db.get_item("missing").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut db = setup_db();

        db.set_item("mudraActiveClinic", "dental").unwrap();
        db.set_item("mudraActiveClinic", "meditouch").unwrap();

        assert_eq!(
            db.get_item("mudraActiveClinic").unwrap(),
            Some("meditouch".into())
        );
        assert_eq!(db.keys().unwrap(), vec!["mudraActiveClinic".to_string()]);
    }

    #[test]
    fn test_remove_item() {
        let mut db = setup_db();

        db.set_item("mudraUser", r#"{"id":"1"}"#).unwrap();
        db.remove_item("mudraUser").unwrap();
        assert_eq!(db.get_item("mudraUser").unwrap(), None);

        // Removing again is a no-op
        assert!(db.remove_item("mudraUser").is_ok());
    }

    #[test]
    fn test_clear() {
        let mut db = setup_db();

        db.set_item("a", "1").unwrap();
        db.set_item("b", "2").unwrap();
        db.clear().unwrap();
        assert!(db.keys().unwrap().is_empty());
    }
}
