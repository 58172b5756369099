use crate::error::{ConvertError, ConvertResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Type registry configuration, parsed from a TOML file.
///
/// ```toml
/// database_path = "/var/lib/modelreg/metadata.db"
/// type_table = "Type"
/// preload = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// SQLite file holding the type table. `None` opens an in-memory database.
    pub database_path: Option<PathBuf>,
    /// Name of the table listing store types.
    pub type_table: String,
    /// Load every type row into the cache at initialization.
    pub preload: bool,
}

fn default_type_table() -> String {
    "Type".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            type_table: default_type_table(),
            preload: false,
        }
    }
}

impl RegistryConfig {
    /// Loads configuration from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> ConvertResult<Self> {
        if !path.exists() {
            info!("No registry config found at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConvertError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::parse(&raw)
    }

    /// Parses configuration from TOML text.
    pub fn parse(raw: &str) -> ConvertResult<Self> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| ConvertError::Config(format!("invalid registry config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// The table name is interpolated into SQL, so only identifier
    /// characters are accepted.
    pub fn validate(&self) -> ConvertResult<()> {
        let valid = !self.type_table.is_empty()
            && self
                .type_table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(())
        } else {
            Err(ConvertError::Config(format!(
                "invalid type table name {:?}",
                self.type_table
            )))
        }
    }
}
