use modelreg_convert::{ErrorClass, RegistryConfig, SqliteTypeTable, TypeRegistry};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = RegistryConfig::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, RegistryConfig::default());
    assert_eq!(config.type_table, "Type");
    assert!(!config.preload);
    assert_eq!(config.database_path, None);
}

#[test]
fn loads_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("registry.toml");
    std::fs::write(
        &path,
        "database_path = \"/var/lib/modelreg/metadata.db\"\ntype_table = \"MlmdType\"\npreload = true\n",
    )
    .unwrap();

    let config = RegistryConfig::load_from(&path).unwrap();
    assert_eq!(
        config,
        RegistryConfig {
            database_path: Some(PathBuf::from("/var/lib/modelreg/metadata.db")),
            type_table: "MlmdType".into(),
            preload: true,
        }
    );
}

#[test]
fn partial_toml_keeps_defaults() {
    let config = RegistryConfig::parse("preload = true").unwrap();
    assert!(config.preload);
    assert_eq!(config.type_table, "Type");
}

#[test]
fn invalid_table_name_is_rejected() {
    let err = RegistryConfig::parse("type_table = \"Type; DROP TABLE x\"").unwrap_err();
    assert_eq!(err.class(), ErrorClass::Fatal);

    let err = RegistryConfig::parse("preload = \"yes\"").unwrap_err();
    assert_eq!(err.class(), ErrorClass::Fatal);
}

#[test]
fn file_backed_table_persists_between_opens() {
    let dir = TempDir::new().unwrap();
    let config = RegistryConfig {
        database_path: Some(dir.path().join("types.db")),
        type_table: "MlmdType".into(),
        preload: true,
    };
    {
        let table = SqliteTypeTable::open(&config).unwrap();
        table.insert_type(10, "kf.ModelArtifact").unwrap();
    }

    let registry = TypeRegistry::new();
    registry
        .initialize_with(SqliteTypeTable::open(&config).unwrap(), &config)
        .unwrap();
    assert_eq!(registry.cached_len(), 1);
    assert_eq!(registry.resolve_name(10).unwrap(), "kf.ModelArtifact");
}
