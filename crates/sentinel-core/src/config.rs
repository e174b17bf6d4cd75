//! Configuration loading and typed config structures for SentinelOps.
//!
//! The configuration lives in `sentinel-config.yaml` in the working
//! directory. Every field has a default, so an empty or missing file
//! yields a usable development configuration.
//!
//! Environment variables override the YAML values:
//! - `ENVIRONMENT` overrides `service.environment`
//! - `SENTINEL_HOST` overrides `server.host`
//! - `SENTINEL_PORT` overrides `server.port`

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SentinelConfig {
    /// Service identity and deployment environment.
    #[serde(default)]
    pub service: ServiceConfig,

    /// HTTP listener and CORS settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Simulator parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SentinelConfig {
    /// Load configuration from a YAML file at the given path and apply
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string. Environment overrides are
    /// not applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Override values from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Override values using the given variable lookup.
    ///
    /// Unparseable port values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("ENVIRONMENT") {
            self.service.environment = val;
        }
        if let Some(val) = lookup("SENTINEL_HOST") {
            self.server.host = val;
        }
        if let Some(port) = lookup("SENTINEL_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Deployment environment. Development unlocks the reset trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Local development.
    #[default]
    Development,
    /// Any deployed environment.
    Production,
}

impl Environment {
    /// Interpret an environment name. Only `development` (any case) maps to
    /// [`Environment::Development`].
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("development") {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// Whether this is the development environment.
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Lowercase name as reported by the API.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl core::fmt::Display for Environment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// Human-readable service name.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Version reported by the API root.
    #[serde(default = "default_service_version")]
    pub version: String,

    /// Deployment environment name, reported verbatim by the API root.
    /// See [`ServiceConfig::environment`] for how it gates behavior.
    #[serde(default = "default_environment_name")]
    pub environment: String,
}

impl ServiceConfig {
    /// The policy environment named by `environment`.
    pub fn environment(&self) -> Environment {
        Environment::from_name(&self.environment)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            version: default_service_version(),
            environment: default_environment_name(),
        }
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Cross-origin settings.
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: CorsConfig::default(),
        }
    }
}

/// Allowed dashboard origins per environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed in development.
    #[serde(default = "default_development_origins")]
    pub development_origins: Vec<String>,

    /// Origins allowed everywhere else.
    #[serde(default = "default_production_origins")]
    pub production_origins: Vec<String>,
}

impl CorsConfig {
    /// The origin list that applies to `environment`.
    pub fn origins_for(&self, environment: Environment) -> &[String] {
        match environment {
            Environment::Development => &self.development_origins,
            Environment::Production => &self.production_origins,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            development_origins: default_development_origins(),
            production_origins: default_production_origins(),
        }
    }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Simulator parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Seed for the obstacle draw. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Probability that a tick emits an obstacle event.
    #[serde(default = "default_obstacle_probability")]
    pub obstacle_probability: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            obstacle_probability: default_obstacle_probability(),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
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

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_service_name() -> String {
    "SentinelOps AI".to_owned()
}

fn default_service_version() -> String {
    "1.0.0".to_owned()
}

fn default_environment_name() -> String {
    Environment::Development.as_str().to_owned()
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8000
}

fn default_development_origins() -> Vec<String> {
    vec![
        "http://localhost:5500".to_owned(),
        "http://127.0.0.1:5500".to_owned(),
    ]
}

fn default_production_origins() -> Vec<String> {
    vec!["https://sentinelops-ai.onrender.com".to_owned()]
}

const fn default_obstacle_probability() -> f64 {
    0.1
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn default_config_is_development() {
        let config = SentinelConfig::default();
        assert_eq!(config.service.name, "SentinelOps AI");
        assert_eq!(config.service.version, "1.0.0");
        assert_eq!(config.service.environment, "development");
        assert!(config.service.environment().is_development());
        assert_eq!(config.server.port, 8000);
        assert!(config.simulation.seed.is_none());
        assert!((config.simulation.obstacle_probability - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
service:
  name: "Test Sentinel"
  version: "2.0.0"
  environment: production

server:
  host: "127.0.0.1"
  port: 9090
  cors:
    development_origins:
      - "http://localhost:3000"
    production_origins:
      - "https://example.test"

simulation:
  seed: 42
  obstacle_probability: 0.25

logging:
  level: "debug"
"#;

        let config = SentinelConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.service.name, "Test Sentinel");
        assert_eq!(config.service.environment(), Environment::Production);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(
            config.server.cors.origins_for(Environment::Production),
            ["https://example.test".to_owned()]
        );
        assert_eq!(config.simulation.seed, Some(42));
        assert!((config.simulation.obstacle_probability - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = SentinelConfig::parse("simulation:\n  seed: 7\n");
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.cors.development_origins.len(), 2);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = SentinelConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn parse_invalid_yaml() {
        let config = SentinelConfig::parse("server: [unterminated");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = SentinelConfig::default();
        config.apply_overrides(lookup_from(&[
            ("ENVIRONMENT", "Production"),
            ("SENTINEL_HOST", "10.0.0.5"),
            ("SENTINEL_PORT", "8088"),
        ]));

        assert_eq!(config.service.environment, "Production");
        assert_eq!(config.service.environment(), Environment::Production);
        assert_eq!(config.server.host, "10.0.0.5");
        assert_eq!(config.server.port, 8088);
    }

    #[test]
    fn yaml_and_env_environment_names_agree() {
        for name in ["Development", "DEVELOPMENT", "staging", "Production"] {
            let parsed = SentinelConfig::parse(&format!("service:\n  environment: {name}\n"));
            assert!(parsed.is_ok(), "{name} rejected: {parsed:?}");
            let from_yaml = parsed.ok().unwrap_or_default();

            let mut from_env = SentinelConfig::default();
            from_env.apply_overrides(lookup_from(&[("ENVIRONMENT", name)]));

            assert_eq!(from_yaml.service.environment, name);
            assert_eq!(from_yaml.service.environment(), from_env.service.environment());
            assert_eq!(
                from_yaml.service.environment().is_development(),
                name.eq_ignore_ascii_case("development")
            );
        }
    }

    #[test]
    fn bad_port_override_is_ignored() {
        let mut config = SentinelConfig::default();
        config.apply_overrides(lookup_from(&[("SENTINEL_PORT", "not-a-port")]));
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("sentinel-config.yaml");
        if path.exists() {
            let config = SentinelConfig::parse(&std::fs::read_to_string(&path).unwrap_or_default());
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }

    #[test]
    fn environment_names() {
        assert_eq!(Environment::from_name("DEVELOPMENT"), Environment::Development);
        assert_eq!(Environment::from_name(" development "), Environment::Development);
        assert_eq!(Environment::from_name("staging"), Environment::Production);
        assert_eq!(Environment::Production.to_string(), "production");
    }
}
