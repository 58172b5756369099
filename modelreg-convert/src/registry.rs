//! Type identifier registry.
//!
//! Maps store type ids to the human-readable type names outbound
//! conversions expose (for example to tell a model artifact from a doc
//! artifact, or to check that an embedded row is of the kind being read).
//! Inbound conversions never consult it: they use each kind's fixed type
//! name.
//!
//! The registry is constructed once and injected where needed. It is bound
//! to its backing `Type` table exactly once; a second [`TypeRegistry::initialize`]
//! fails and leaves the first binding and its cache untouched. Lookups are
//! cache-first and query the table on a miss.

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Handle to the relational table listing store types.
pub trait TypeTable: Send + Sync {
    /// Name of the type with `type_id`, or `None` if there is no such row.
    fn type_name(&self, type_id: i64) -> Result<Option<String>, RegistryError>;

    /// Id of the type named `name`, or `None` if there is no such row.
    fn type_id(&self, name: &str) -> Result<Option<i64>, RegistryError>;

    /// Every `(id, name)` row, for cache warming.
    fn all_types(&self) -> Result<Vec<(i64, String)>, RegistryError>;
}

#[derive(Default)]
struct Cache {
    by_id: HashMap<i64, String>,
    by_name: HashMap<String, i64>,
}

impl Cache {
    fn insert(&mut self, id: i64, name: String) {
        self.by_name.insert(name.clone(), id);
        self.by_id.insert(id, name);
    }
}

/// Resolves store type ids to names. Safe to share across threads once
/// initialized.
#[derive(Default)]
pub struct TypeRegistry {
    table: OnceLock<Box<dyn TypeTable>>,
    cache: RwLock<Cache>,
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("initialized", &self.is_initialized())
            .field("cached", &self.cached_len())
            .finish()
    }
}

impl TypeRegistry {
    /// An unbound registry. Every lookup fails with
    /// [`RegistryError::Uninitialized`] until [`Self::initialize`] succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the registry to its backing table without preloading.
    pub fn initialize(&self, table: impl TypeTable + 'static) -> Result<(), RegistryError> {
        self.initialize_with(table, &RegistryConfig::default())
    }

    /// Binds the registry to its backing table, warming the cache first when
    /// `config.preload` is set.
    pub fn initialize_with(
        &self,
        table: impl TypeTable + 'static,
        config: &RegistryConfig,
    ) -> Result<(), RegistryError> {
        if self.is_initialized() {
            warn!("Rejected second type registry initialization");
            return Err(RegistryError::AlreadyInitialized);
        }

        let mut warmed = Cache::default();
        if config.preload {
            for (id, name) in table.all_types()? {
                warmed.insert(id, name);
            }
            debug!(types = warmed.by_id.len(), "Preloaded type registry cache");
        }

        if self.table.set(Box::new(table)).is_err() {
            warn!("Rejected concurrent type registry initialization");
            return Err(RegistryError::AlreadyInitialized);
        }

        let mut cache = self.write_cache();
        for (id, name) in warmed.by_id {
            cache.insert(id, name);
        }
        info!(preload = config.preload, "Type registry initialized");
        Ok(())
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.table.get().is_some()
    }

    /// Type name for a store type id.
    pub fn resolve_name(&self, type_id: i64) -> Result<String, RegistryError> {
        let table = self.table()?;
        if let Some(name) = self.read_cache().by_id.get(&type_id) {
            return Ok(name.clone());
        }

        debug!(type_id, "Type registry cache miss");
        let name = table
            .type_name(type_id)?
            .ok_or(RegistryError::NotFound(type_id))?;
        self.write_cache().insert(type_id, name.clone());
        Ok(name)
    }

    /// Store type id for a type name.
    pub fn resolve_id(&self, name: &str) -> Result<i64, RegistryError> {
        let table = self.table()?;
        if let Some(id) = self.read_cache().by_name.get(name) {
            return Ok(*id);
        }

        debug!(type_name = name, "Type registry cache miss");
        let id = table
            .type_id(name)?
            .ok_or_else(|| RegistryError::NameNotFound(name.to_string()))?;
        self.write_cache().insert(id, name.to_string());
        Ok(id)
    }

    /// Number of cached type ids.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.read_cache().by_id.len()
    }

    fn table(&self) -> Result<&dyn TypeTable, RegistryError> {
        self.table
            .get()
            .map(|table| &**table)
            .ok_or(RegistryError::Uninitialized)
    }

    // The cache only ever holds rows copied from the table, so a poisoned
    // lock still guards consistent data.
    fn read_cache(&self) -> std::sync::RwLockReadGuard<'_, Cache> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> std::sync::RwLockWriteGuard<'_, Cache> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }
}
