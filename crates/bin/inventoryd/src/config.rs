//! Runtime settings for `inventoryd`.
//!
//! Values are layered: built-in defaults, then `inventory.toml` from the
//! working directory when it exists, then `INVENTORY_*` environment
//! variables. The merged result is validated once before the server starts.

use std::path::{Path, PathBuf};

use serde::Deserialize;

const CONFIG_FILE: &str = "inventory.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// `[server]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Built web frontend, served for every path the API does not claim.
    pub static_dir: Option<PathBuf>,
}

/// `[database]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx `SQLite` URL. `?mode=rwc` lets the file be created on first run.
    pub url: String,
    pub max_connections: u32,
}

/// `[logging]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive.
    pub filter: String,
}

impl Config {
    /// Resolve the configuration from `inventory.toml` and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, an
    /// environment override is malformed, or the merged settings are invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
    }

    fn resolve(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(host) = env("INVENTORY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env("INVENTORY_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::Env {
                key: "INVENTORY_PORT",
                value: port.clone(),
            })?;
        }
        // Applied after HOST and PORT so the combined form wins.
        if let Some(bind) = env("INVENTORY_BIND") {
            let (host, port) = parse_bind(&bind)?;
            self.server.host = host;
            self.server.port = port;
        }
        // An empty value switches the frontend off even if the file sets one.
        if let Some(dir) = env("INVENTORY_STATIC_DIR") {
            self.server.static_dir = (!dir.is_empty()).then(|| PathBuf::from(dir));
        }
        if let Some(url) = env("INVENTORY_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(filter) = env("INVENTORY_LOG").or_else(|| env("RUST_LOG")) {
            self.logging.filter = filter;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if let Some(dir) = &self.server.static_dir
            && !dir.is_dir()
        {
            return Err(ConfigError::Validation(format!(
                "static_dir {} is not a directory",
                dir.display()
            )));
        }
        Ok(())
    }

    /// `host:port` string accepted by `TcpListener::bind`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    #[must_use]
    pub fn static_dir(&self) -> Option<&Path> {
        self.server.static_dir.as_deref()
    }
}

/// Split `INVENTORY_BIND` into host and port. The host is kept verbatim, so
/// a bracketed IPv6 literal such as `[::1]:8080` stays bindable.
fn parse_bind(value: &str) -> Result<(String, u16), ConfigError> {
    let invalid = || ConfigError::Env {
        key: "INVENTORY_BIND",
        value: value.to_string(),
    };
    let (host, port) = value.rsplit_once(':').ok_or_else(invalid)?;
    if host.is_empty() {
        return Err(invalid());
    }
    let port = port.parse().map_err(|_| invalid())?;
    Ok((host.to_string(), port))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:inventory.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "inventoryd=info,inventory=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse inventory.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read inventory.toml: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid value {value:?} for {key}")]
    Env { key: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| vars.get(key).map(ToString::to_string)
    }

    fn resolve_without_file(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        Config::resolve(Path::new("does-not-exist/inventory.toml"), env(vars))
    }

    #[test]
    fn should_serve_on_8080_with_local_database_when_nothing_configured() {
        let config = resolve_without_file(&[]).unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.database_url(), "sqlite:inventory.db?mode=rwc");
        assert_eq!(config.database.max_connections, 5);
        assert!(config.static_dir().is_none());
    }

    #[test]
    fn should_read_static_dir_and_pool_size_from_toml() {
        let config: Config = toml::from_str(
            "
            [server]
            static_dir = 'frontend/build'

            [database]
            max_connections = 2
            ",
        )
        .unwrap();

        assert_eq!(config.static_dir(), Some(Path::new("frontend/build")));
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn should_prefer_env_static_dir_over_file() {
        let mut config: Config = toml::from_str("[server]\nstatic_dir = 'from-file'").unwrap();

        config.apply_env(env(&[("INVENTORY_STATIC_DIR", "from-env")])).unwrap();

        assert_eq!(config.static_dir(), Some(Path::new("from-env")));
    }

    #[test]
    fn should_disable_static_dir_when_env_value_is_empty() {
        let mut config: Config = toml::from_str("[server]\nstatic_dir = 'from-file'").unwrap();

        config.apply_env(env(&[("INVENTORY_STATIC_DIR", "")])).unwrap();

        assert!(config.static_dir().is_none());
    }

    #[test]
    fn should_reject_static_dir_that_is_not_a_directory() {
        let result = resolve_without_file(&[("INVENTORY_STATIC_DIR", "/definitely/not/here")]);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_accept_existing_static_dir() {
        let dir = std::env::temp_dir();
        let config =
            resolve_without_file(&[("INVENTORY_STATIC_DIR", dir.to_str().unwrap())]).unwrap();
        assert_eq!(config.static_dir(), Some(dir.as_path()));
    }

    #[test]
    fn should_let_bind_override_host_and_port() {
        let config = resolve_without_file(&[
            ("INVENTORY_HOST", "10.0.0.1"),
            ("INVENTORY_PORT", "9000"),
            ("INVENTORY_BIND", "127.0.0.1:3001"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:3001");
    }

    #[test]
    fn should_keep_brackets_when_binding_ipv6() {
        assert_eq!(parse_bind("[::1]:8443").unwrap(), ("[::1]".to_string(), 8443));
    }

    #[test]
    fn should_reject_bind_without_port_or_host() {
        for bad in ["localhost", "localhost:http", ":8080", "localhost:70000"] {
            let result = parse_bind(bad);
            assert!(
                matches!(result, Err(ConfigError::Env { key: "INVENTORY_BIND", .. })),
                "{bad} accepted"
            );
        }
    }

    #[test]
    fn should_reject_non_numeric_port_env() {
        let result = resolve_without_file(&[("INVENTORY_PORT", "eighty")]);
        assert!(matches!(
            result,
            Err(ConfigError::Env { key: "INVENTORY_PORT", .. })
        ));
    }

    #[test]
    fn should_reject_zero_port() {
        let result = resolve_without_file(&[("INVENTORY_BIND", "0.0.0.0:0")]);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_prefer_inventory_log_over_rust_log() {
        let config = resolve_without_file(&[
            ("RUST_LOG", "warn"),
            ("INVENTORY_LOG", "inventoryd=trace"),
        ])
        .unwrap();
        assert_eq!(config.logging.filter, "inventoryd=trace");
    }

    #[test]
    fn should_fall_back_to_rust_log() {
        let config = resolve_without_file(&[("RUST_LOG", "warn")]).unwrap();
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_override_file_database_url_from_env() {
        let mut config: Config = toml::from_str("[database]\nurl = 'sqlite:file.db'").unwrap();

        config
            .apply_env(env(&[("INVENTORY_DATABASE_URL", "sqlite::memory:")]))
            .unwrap();

        assert_eq!(config.database_url(), "sqlite::memory:");
    }

    #[test]
    fn should_report_parse_error_for_mistyped_port() {
        let result: Result<Config, _> = toml::from_str("[server]\nport = 'eighty'");
        assert!(result.is_err());
    }
}
