//! Configuration management.
//!
//! Settings come from an optional TOML file and `SCHOLAR_CITES_*` environment
//! variables, with `__` separating section and key:
//!
//! ```toml
//! [scholar]
//! base_url = "https://scholar.google.com"
//! search_path = "/scholar"
//! default_query_url = "https://scholar.google.com/scholar?q=kubernetes&hl=es"
//! language = "es"
//!
//! [http]
//! timeout_secs = 10
//! connect_timeout_secs = 5
//! user_agent = "Mozilla/5.0"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! `SCHOLAR_CITES_HTTP__TIMEOUT_SECS=30` overrides `http.timeout_secs`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of the environment variables read into [`Config`]
pub const ENV_PREFIX: &str = "SCHOLAR_CITES";

/// File name looked up in the working and config directories
pub const CONFIG_FILE_NAME: &str = "scholar-cites.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Search site settings
    #[serde(default)]
    pub scholar: ScholarConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Search site the pages come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarConfig {
    /// Scheme and host that relative citation links are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the results page under `base_url`
    #[serde(default = "default_search_path")]
    pub search_path: String,

    /// Page fetched when no query is given
    #[serde(default = "default_query_url")]
    pub default_query_url: String,

    /// Interface language for built queries (`hl`)
    #[serde(default)]
    pub language: Option<String>,
}

impl Default for ScholarConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            search_path: default_search_path(),
            default_query_url: default_query_url(),
            language: None,
        }
    }
}

fn default_base_url() -> String {
    "https://scholar.google.com".to_string()
}

fn default_search_path() -> String {
    "/scholar".to_string()
}

fn default_query_url() -> String {
    "https://scholar.google.com/scholar?q=kubernetes&hl=es&as_sdt=1%2C5&as_ylo=2019&as_yhi=2009"
        .to_string()
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_user_agent() -> String {
    // Scholar rejects obviously non-browser agents
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level used when neither `RUST_LOG` nor a verbosity flag is given
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Load configuration from environment variables and defaults only
pub fn load_env_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(environment())
        .build()?
        .try_deserialize()
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("scholar-cites").join("config.toml"))
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scholar.base_url, "https://scholar.google.com");
        assert_eq!(config.scholar.search_path, "/scholar");
        assert!(config.scholar.default_query_url.contains("q=kubernetes"));
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[scholar]
base_url = "https://scholar.example.test"

[http]
timeout_secs = 30
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.scholar.base_url, "https://scholar.example.test");
        assert_eq!(config.scholar.search_path, "/scholar");
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.connect_timeout_secs, 5);
    }

    #[test]
    fn test_load_config_nonexistent() {
        let path = PathBuf::from("/nonexistent/config.toml");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");
        std::fs::write(&path, "invalid = toml = content").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("SCHOLAR_CITES_SCHOLAR__LANGUAGE", "pt-BR");
        let config = load_env_config().unwrap();
        std::env::remove_var("SCHOLAR_CITES_SCHOLAR__LANGUAGE");

        assert_eq!(config.scholar.language, Some("pt-BR".to_string()));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.scholar.language = Some("es".to_string());

        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[scholar]"));

        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
