//! SQLite-backed [`TypeTable`].

use crate::config::RegistryConfig;
use crate::error::{ConvertError, ConvertResult, RegistryError};
use crate::registry::TypeTable;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;
use tracing::debug;

/// The relational `Type` table: one row per store type.
pub struct SqliteTypeTable {
    conn: Mutex<Connection>,
    table: String,
}

impl std::fmt::Debug for SqliteTypeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteTypeTable")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl SqliteTypeTable {
    /// Opens (or creates) the type table described by `config`.
    pub fn open(config: &RegistryConfig) -> ConvertResult<Self> {
        config.validate()?;
        let conn = match &config.database_path {
            Some(path) => Connection::open(path),
            None => Connection::open_in_memory(),
        }
        .map_err(|e| ConvertError::Config(format!("failed to open type table: {e}")))?;
        let store = Self {
            conn: Mutex::new(conn),
            table: config.type_table.clone(),
        };
        store.init_schema().map_err(ConvertError::Registry)?;
        Ok(store)
    }

    /// Opens an in-memory type table (for testing).
    pub fn open_in_memory() -> ConvertResult<Self> {
        Self::open(&RegistryConfig::default())
    }

    fn init_schema(&self) -> Result<(), RegistryError> {
        let conn = self.lock()?;
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS \"{table}\" (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                version TEXT,
                type_kind INTEGER,
                description TEXT
            );",
            table = self.table
        ))
        .map_err(|e| backend("failed to init type schema", &e))
    }

    /// Inserts or replaces a type row.
    pub fn insert_type(&self, id: i64, name: &str) -> Result<(), RegistryError> {
        let conn = self.lock()?;
        conn.execute(
            &format!("INSERT OR REPLACE INTO \"{}\" (id, name) VALUES (?1, ?2)", self.table),
            params![id, name],
        )
        .map_err(|e| backend("failed to insert type", &e))?;
        debug!(type_id = id, type_name = name, "Inserted type row");
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, RegistryError> {
        self.conn
            .lock()
            .map_err(|_| RegistryError::Backend("type table connection poisoned".to_string()))
    }
}

impl TypeTable for SqliteTypeTable {
    fn type_name(&self, type_id: i64) -> Result<Option<String>, RegistryError> {
        let conn = self.lock()?;
        conn.query_row(
            &format!("SELECT name FROM \"{}\" WHERE id = ?1", self.table),
            params![type_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| backend("failed to query type name", &e))
    }

    fn type_id(&self, name: &str) -> Result<Option<i64>, RegistryError> {
        let conn = self.lock()?;
        conn.query_row(
            &format!("SELECT id FROM \"{}\" WHERE name = ?1", self.table),
            params![name],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| backend("failed to query type id", &e))
    }

    fn all_types(&self) -> Result<Vec<(i64, String)>, RegistryError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!("SELECT id, name FROM \"{}\" ORDER BY id", self.table))
            .map_err(|e| backend("failed to prepare type query", &e))?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .map_err(|e| backend("failed to list types", &e))?;
        let types = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| backend("failed to read type row", &e))?;
        Ok(types)
    }
}

fn backend(context: &str, e: &rusqlite::Error) -> RegistryError {
    RegistryError::Backend(format!("{context}: {e}"))
}
