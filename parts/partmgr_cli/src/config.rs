use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

pub const CONFIG_FILE_NAME: &str = "partmgr.json";
pub const SYSTEM_CONFIG_DIRECTORY: &str = "/etc/partmgr";
pub const USER_CONFIG_DIRECTORY: &str = ".partmgr";

/// Used when a configuration file was found but does not name a database.
pub const DEFAULT_DB: &str = "/etc/partmgr/parts";

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub db: Option<PathBuf>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found. path: {0}")]
    NotFound(PathBuf),
    #[error("Unable to read configuration file. path: {path}, cause: {cause}")]
    Io { path: PathBuf, cause: std::io::Error },
    #[error("Invalid configuration file. path: {path}, cause: {cause}")]
    Invalid { path: PathBuf, cause: serde_json::Error },
    #[error("No parts database configured, use '--db', 'PARTMGR_DB' or a 'partmgr.json' configuration file")]
    NoDatabase,
}

/// The default configuration file locations, lowest precedence first.
pub fn default_locations() -> Vec<PathBuf> {
    let mut locations = vec![Path::new(SYSTEM_CONFIG_DIRECTORY).join(CONFIG_FILE_NAME)];
    if let Some(home) = dirs::home_dir() {
        locations.push(
            home.join(USER_CONFIG_DIRECTORY)
                .join(CONFIG_FILE_NAME),
        );
    }
    locations.push(PathBuf::from(CONFIG_FILE_NAME));
    locations
}

/// Configuration merged from every file found, later files override earlier ones.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub files: Vec<PathBuf>,
}

/// Reads the default locations that exist, then `explicit`, which must exist.
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let mut loaded = LoadedConfig::default();

    for path in default_locations() {
        if path.is_file() {
            merge(&mut loaded, &path)?;
        } else {
            debug!("No configuration file. path: {}", path.display());
        }
    }

    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        merge(&mut loaded, path)?;
    }

    Ok(loaded)
}

fn merge(loaded: &mut LoadedConfig, path: &Path) -> Result<(), ConfigError> {
    let content = fs::read_to_string(path).map_err(|cause| ConfigError::Io {
        path: path.to_path_buf(),
        cause,
    })?;
    let config: Config = serde_json::from_str(&content).map_err(|cause| ConfigError::Invalid {
        path: path.to_path_buf(),
        cause,
    })?;
    info!("Loaded configuration. path: {}", path.display());

    if config.db.is_some() {
        loaded.config.db = config.db;
    }
    loaded.files.push(path.to_path_buf());

    Ok(())
}

/// Picks the database directory, `cli_db` (from '--db' or 'PARTMGR_DB') wins over the configuration files.
pub fn resolve_db(cli_db: Option<PathBuf>, loaded: &LoadedConfig) -> Result<PathBuf, ConfigError> {
    let db = match (cli_db, &loaded.config.db) {
        (Some(db), _) => db,
        (None, Some(db)) => db.clone(),
        (None, None) if !loaded.files.is_empty() => PathBuf::from(DEFAULT_DB),
        (None, None) => return Err(ConfigError::NoDatabase),
    };

    Ok(expand_home(db))
}

/// Expands a leading `~` to the home directory.
fn expand_home(path: PathBuf) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path;
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    fn loaded(db: Option<&str>, files: usize) -> LoadedConfig {
        LoadedConfig {
            config: Config {
                db: db.map(PathBuf::from),
            },
            files: (0..files)
                .map(|index| PathBuf::from(format!("config_{}.json", index)))
                .collect(),
        }
    }

    #[test]
    fn cli_db_overrides_config() {
        let db = resolve_db(Some(PathBuf::from("/tmp/cli")), &loaded(Some("/tmp/config"), 1)).unwrap();

        assert_eq!(db, PathBuf::from("/tmp/cli"));
    }

    #[test]
    fn config_db() {
        let db = resolve_db(None, &loaded(Some("/tmp/config"), 1)).unwrap();

        assert_eq!(db, PathBuf::from("/tmp/config"));
    }

    #[test]
    fn config_without_db_uses_default() {
        let db = resolve_db(None, &loaded(None, 1)).unwrap();

        assert_eq!(db, PathBuf::from(DEFAULT_DB));
    }

    #[test]
    fn no_configuration() {
        let result = resolve_db(None, &loaded(None, 0));

        assert!(matches!(result, Err(ConfigError::NoDatabase)));
    }

    #[test]
    fn home_is_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };

        let db = resolve_db(Some(PathBuf::from("~/parts")), &loaded(None, 0)).unwrap();

        assert_eq!(db, home.join("parts"));
    }

    #[test]
    fn explicit_config_file_overrides_defaults() {
        // given
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("custom.json");
        write(&path, r#"{ "db": "/srv/parts" }"#).unwrap();

        // when
        let loaded = load(Some(&path)).unwrap();

        // then
        assert_eq!(loaded.config.db, Some(PathBuf::from("/srv/parts")));
        assert_eq!(loaded.files.last(), Some(&path));
    }

    #[test]
    fn missing_explicit_config_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("missing.json");

        let result = load(Some(&path));

        assert!(matches!(result, Err(ConfigError::NotFound(missing)) if missing == path));
    }

    #[test]
    fn invalid_config_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("invalid.json");
        write(&path, r#"{ "database": "/srv/parts" }"#).unwrap();

        let result = load(Some(&path));

        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}
