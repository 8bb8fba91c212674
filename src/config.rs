use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CATALOG_URL: &str = "https://swapi.py4e.com/api/";
pub const DEFAULT_RATINGS_URL: &str = "https://www.omdbapi.com/";

const ENV_CATALOG_URL: &str = "FILM_EXPLORER_CATALOG_URL";
const ENV_RATINGS_URL: &str = "FILM_EXPLORER_RATINGS_URL";
const ENV_API_KEY: &str = "OMDB_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Runtime configuration.
///
/// Precedence: CLI flags > environment > config file > defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog_url: String,
    pub ratings_url: String,
    pub ratings_api_key: String,
    pub request_timeout_secs: u64,
    pub total_stars: u8,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            ratings_url: DEFAULT_RATINGS_URL.to_string(),
            ratings_api_key: String::new(),
            request_timeout_secs: 30,
            total_stars: 5,
            log_level: "info".to_string(),
        }
    }
}

/// Overrides collected from the command line.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub catalog_url: Option<String>,
    pub ratings_url: Option<String>,
    pub api_key: Option<String>,
}

impl Config {
    /// Default location of the config file, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "film-explorer", "film-explorer")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load config from `path` (or the default location), then apply
    /// environment overrides.
    ///
    /// A missing file at the default location is not an error; a missing
    /// file that was asked for explicitly is. Values are not validated here:
    /// CLI flags still have to be layered on top, and [`Config::apply_cli`]
    /// validates the merged result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides through `lookup` (normally `std::env::var`).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup(ENV_CATALOG_URL).filter(|v| !v.is_empty()) {
            self.catalog_url = v;
        }
        if let Some(v) = lookup(ENV_RATINGS_URL).filter(|v| !v.is_empty()) {
            self.ratings_url = v;
        }
        if let Some(v) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            self.ratings_api_key = v;
        }
    }

    pub fn apply_cli(&mut self, overrides: CliOverrides) -> Result<(), ConfigError> {
        if let Some(v) = overrides.catalog_url {
            self.catalog_url = v;
        }
        if let Some(v) = overrides.ratings_url {
            self.ratings_url = v;
        }
        if let Some(v) = overrides.api_key {
            self.ratings_api_key = v;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [("catalog_url", &self.catalog_url), ("ratings_url", &self.ratings_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be an http(s) URL, got {url:?}"
                )));
            }
        }
        if self.total_stars == 0 {
            return Err(ConfigError::Invalid("total_stars must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
        assert_eq!(config.total_stars, 5);
        assert!(config.ratings_api_key.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ratings_api_key = \"abc123\"\ntotal_stars = 10").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.ratings_api_key, "abc123");
        assert_eq!(config.total_stars, 10);
        assert_eq!(config.ratings_url, DEFAULT_RATINGS_URL);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "total_stars = \"many\"").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_cli_override_replaces_invalid_file_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "catalog_url = \"localhost:8000/api/\"").unwrap();

        let from_file = Config::from_file(file.path()).unwrap();
        assert!(matches!(from_file.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::load(Some(file.path())).unwrap();
        config
            .apply_cli(CliOverrides {
                catalog_url: Some("http://localhost:8000/api/".to_string()),
                ..CliOverrides::default()
            })
            .unwrap();
        assert_eq!(config.catalog_url, "http://localhost:8000/api/");
    }

    #[test]
    fn test_env_overrides_file() {
        let env: HashMap<&str, &str> = [
            ("OMDB_API_KEY", "from-env"),
            ("FILM_EXPLORER_CATALOG_URL", "http://localhost:8000/api/"),
            ("FILM_EXPLORER_RATINGS_URL", ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config {
            ratings_api_key: "from-file".to_string(),
            ..Config::default()
        };
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.ratings_api_key, "from-env");
        assert_eq!(config.catalog_url, "http://localhost:8000/api/");
        // Empty values are ignored.
        assert_eq!(config.ratings_url, DEFAULT_RATINGS_URL);
    }

    #[test]
    fn test_cli_overrides_env() {
        let mut config = Config::default();
        config.apply_env(|k| (k == "OMDB_API_KEY").then(|| "from-env".to_string()));
        config
            .apply_cli(CliOverrides {
                api_key: Some("from-cli".to_string()),
                ..CliOverrides::default()
            })
            .unwrap();
        assert_eq!(config.ratings_api_key, "from-cli");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config {
            total_stars: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        let err = config
            .apply_cli(CliOverrides {
                catalog_url: Some("ftp://nowhere".to_string()),
                ..CliOverrides::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("catalog_url"));
    }
}
