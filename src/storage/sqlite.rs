//! SQLite storage implementation

use std::path::Path;
use std::str::FromStr;
use rusqlite::{Connection, params, OptionalExtension};
use crate::Result;
use crate::flatten::Parameters;
use super::schema;

/// SQLite-backed parameter table
pub struct ParameterStore {
    conn: Connection,
}

impl ParameterStore {
    /// Open a database file (creates it and its parent directories if missing)
    pub fn open(path: &Path) -> Result<Self> {
        ensure_db_dir(path)?;
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Write Operations ==========

    /// Upsert every parameter in a single transaction.
    ///
    /// Rows whose keys are not in `parameters` are left untouched.
    pub fn write(&mut self, parameters: &Parameters) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(schema::UPSERT_PARAMETER)?;
            for (key, value) in parameters {
                stmt.execute(params![key, value])?;
            }
        }
        tx.commit()?;
        tracing::debug!("Upserted {} parameters", parameters.len());
        Ok(parameters.len())
    }

    /// Insert or replace a single parameter
    #[cfg(test)]
    fn upsert(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(schema::UPSERT_PARAMETER, params![key, value])?;
        Ok(())
    }

    // ========== Read Operations ==========

    /// Stored text for `key`
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT value FROM parameters WHERE key = ?1 LIMIT 1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.flatten())
    }

    /// Stored text for `key` parsed as `T`.
    ///
    /// Returns `None` when the key is absent or the whole text does not
    /// parse as `T`.
    pub fn get_value<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        Ok(self.get(key)?.and_then(|text| text.parse().ok()))
    }

    /// All rows ordered by key
    pub fn entries(&self) -> Result<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM parameters ORDER BY key")?;

        let rows = stmt
            .query_map([], |row| {
                let value: Option<String> = row.get(1)?;
                Ok((row.get(0)?, value.unwrap_or_default()))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    /// Count all parameters
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM parameters", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Close the connection, surfacing any error from the final flush
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }
}

/// Create the parent directories of `db_path` if they do not exist
fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn params_of(pairs: &[(&str, &str)]) -> Parameters {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_write_and_get() {
        let mut store = ParameterStore::open_in_memory().unwrap();

        let written = store.write(&params_of(&[("db.host", "localhost"), ("db.port", "5432")])).unwrap();
        assert_eq!(written, 2);

        assert_eq!(store.get("db.host").unwrap().as_deref(), Some("localhost"));
        assert_eq!(store.get("db.missing").unwrap(), None);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_upsert_overwrites() {
        let mut store = ParameterStore::open_in_memory().unwrap();

        store.write(&params_of(&[("a.b", "1")])).unwrap();
        store.write(&params_of(&[("a.b", "2")])).unwrap();

        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.get("a.b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_existing_rows_preserved() {
        let mut store = ParameterStore::open_in_memory().unwrap();
        store.upsert("old.key", "kept").unwrap();

        store.write(&params_of(&[("new.key", "v")])).unwrap();

        assert_eq!(
            store.entries().unwrap(),
            vec![
                ("new.key".to_string(), "v".to_string()),
                ("old.key".to_string(), "kept".to_string()),
            ]
        );
    }

    #[test]
    fn test_typed_lookup() {
        let store = ParameterStore::open_in_memory().unwrap();
        store.upsert("n", "42").unwrap();
        store.upsert("f", "1.5").unwrap();
        store.upsert("flag", "true").unwrap();
        store.upsert("word", "abc").unwrap();
        store.upsert("padded", "42 ").unwrap();

        assert_eq!(store.get_value::<i64>("n").unwrap(), Some(42));
        assert_eq!(store.get_value::<i32>("n").unwrap(), Some(42));
        assert_eq!(store.get_value::<f64>("f").unwrap(), Some(1.5));
        assert_eq!(store.get_value::<bool>("flag").unwrap(), Some(true));
        assert_eq!(store.get_value::<String>("word").unwrap(), Some("abc".to_string()));
        assert_eq!(store.get_value::<i64>("word").unwrap(), None);
        assert_eq!(store.get_value::<i64>("padded").unwrap(), None);
        assert_eq!(store.get_value::<i64>("absent").unwrap(), None);
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/deeper/params.db");

        let mut store = ParameterStore::open(&path).unwrap();
        store.write(&params_of(&[("k", "v")])).unwrap();
        store.close().unwrap();

        assert!(path.exists());
        let reopened = ParameterStore::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_empty_store() {
        let store = ParameterStore::open_in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.entries().unwrap().is_empty());
    }
}
