//! Configuration management for sims.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::validate::ValidationPolicy;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "sims";

/// Default data file, relative to the working directory.
const DATA_FILE_NAME: &str = "students.json";

/// Prefix for nested environment overrides, e.g. `SIMS_SERVER__HOST`.
const ENV_PREFIX: &str = "SIMS_";

/// Plain environment variable that sets the listening port.
const PORT_ENV: &str = "PORT";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. The `PORT` environment variable (for `server.port` only)
/// 2. Environment variables prefixed with `SIMS_`, sections separated by `__`
/// 3. TOML config file at `~/.config/sims/config.toml`
/// 4. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Create validation configuration.
    pub validation: ValidationConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Answer CORS preflights and allow any origin.
    pub cors_enabled: bool,
    /// Largest accepted request body in bytes.
    pub max_body_bytes: usize,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the JSON data file.
    pub data_file: PathBuf,
}

/// Validation applied when creating a student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Also check the gmail pattern and a positive year level on the server.
    pub strict: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_enabled: true,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DATA_FILE_NAME),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing config file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Env::raw().only(&[PORT_ENV]).map(|_| "server.port".into()));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.parse::<IpAddr>().is_err() {
            return Err(Error::ConfigValidation {
                message: format!("server.host is not an IP address: {}", self.server.host),
            });
        }

        if self.server.max_body_bytes == 0 {
            return Err(Error::ConfigValidation {
                message: "server.max_body_bytes must be greater than 0".to_string(),
            });
        }

        if self.storage.data_file.as_os_str().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage.data_file must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the address the server binds to.
    ///
    /// # Errors
    ///
    /// Returns an error if `server.host` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|_| Error::ConfigValidation {
                message: format!("server.host is not an IP address: {}", self.server.host),
            })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Get the data file path.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.storage.data_file
    }

    /// Get the validation policy for creates.
    #[must_use]
    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy::from_strict(self.validation.strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.server.cors_enabled);
        assert_eq!(config.server.max_body_bytes, 1_048_576);
        assert_eq!(config.data_file(), Path::new("students.json"));
        assert!(!config.validation.strict);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_host() {
        let mut config = Config::default();
        config.server.host = "localhost".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("server.host"));
    }

    #[test]
    fn test_validate_zero_body_limit() {
        let mut config = Config::default();
        config.server.max_body_bytes = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("max_body_bytes"));
    }

    #[test]
    fn test_validate_empty_data_file() {
        let mut config = Config::default();
        config.storage.data_file = PathBuf::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("data_file"));
    }

    #[test]
    fn test_socket_addr() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 8080;

        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_validation_policy() {
        let mut config = Config::default();
        assert_eq!(config.validation_policy(), ValidationPolicy::Presence);

        config.validation.strict = true;
        assert_eq!(config.validation_policy(), ValidationPolicy::Strict);
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("sims"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config_uses_defaults() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.storage, StorageConfig::default());
            assert_eq!(config.validation, ValidationConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "sims.toml",
                r#"
                [server]
                host = "127.0.0.1"
                port = 4000
                cors_enabled = false

                [storage]
                data_file = "data/roster.json"

                [validation]
                strict = true
                "#,
            )?;

            let config = Config::load_from(Some(PathBuf::from("sims.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.server.host, "127.0.0.1");
            assert_eq!(config.server.port, 4000);
            assert!(!config.server.cors_enabled);
            assert_eq!(config.data_file(), Path::new("data/roster.json"));
            assert!(config.validation.strict);
            Ok(())
        });
    }

    #[test]
    fn test_default_port_without_env() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let config = Config::load_from(Some(PathBuf::from("missing.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.server.port, 3000);
            assert_eq!(config.server.host, "0.0.0.0");
            Ok(())
        });
    }

    #[test]
    fn test_port_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file("sims.toml", "[server]\nport = 4000\n")?;
            jail.set_env("PORT", "8081");

            let config = Config::load_from(Some(PathBuf::from("sims.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.server.port, 8081);
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_env_overrides() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("SIMS_STORAGE__DATA_FILE", "/srv/sims/students.json");
            jail.set_env("SIMS_VALIDATION__STRICT", "true");

            let config = Config::load_from(Some(PathBuf::from("missing.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.data_file(), Path::new("/srv/sims/students.json"));
            assert!(config.validation.strict);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file("sims.toml", "[server]\nhost = \"not-an-ip\"\n")?;

            let result = Config::load_from(Some(PathBuf::from("sims.toml")));
            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("data_file"));
        assert!(json.contains("cors_enabled"));
    }

    #[test]
    fn test_server_config_deserialize_partial() {
        let server: ServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(server.port, 9000);
        assert_eq!(server.host, "0.0.0.0");
    }
}
