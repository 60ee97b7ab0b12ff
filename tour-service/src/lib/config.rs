use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment as EnvironmentSource;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    #[serde(default)]
    pub environment: Environment,
    /// Origin used in emailed links; derived from the request when unset
    #[serde(default)]
    pub public_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_in_days: i64,
    pub cookie_expires_in_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub from_address: String,
}

/// Deployment mode.
///
/// Development serves cookies without the `secure` flag and renders error
/// details in 500 responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

fn default_max_connections() -> u32 {
    5
}

/// Secret shipped in `config/development.toml` for local runs.
pub const DEVELOPMENT_JWT_SECRET: &str = "development-secret-change-me-32-bytes";

const MIN_PRODUCTION_SECRET_LEN: usize = 32;

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        // JWT__SECRET=... overrides jwt.secret
        Self::build(&run_mode, EnvironmentSource::default().separator("__"))
    }

    fn build(run_mode: &str, overrides: EnvironmentSource) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(overrides)
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.environment.is_development() {
            return Ok(());
        }

        let secret = self.jwt.secret.as_str();
        if secret == DEVELOPMENT_JWT_SECRET {
            return Err(ConfigError::Message(
                "jwt.secret is the development secret; set JWT__SECRET".to_string(),
            ));
        }
        if secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes in production",
                MIN_PRODUCTION_SECRET_LEN
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const PRODUCTION_SECRET: &str = "a-production-secret-of-at-least-32-bytes";

    fn overrides(vars: &[(&str, &str)]) -> EnvironmentSource {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        EnvironmentSource::default().separator("__").source(Some(vars))
    }

    #[test]
    fn test_development_uses_development_secret() {
        let config = Config::build("development", overrides(&[])).unwrap();

        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.jwt.secret, DEVELOPMENT_JWT_SECRET);
    }

    #[test]
    fn test_environment_variables_override_files() {
        let config = Config::build(
            "production",
            overrides(&[
                ("JWT__SECRET", PRODUCTION_SECRET),
                ("DATABASE__URL", "postgres://db.internal/natours"),
                ("SERVER__PUBLIC_URL", "https://natours.example"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.environment, Environment::Production);
        assert_eq!(config.jwt.secret, PRODUCTION_SECRET);
        assert_eq!(config.database.url, "postgres://db.internal/natours");
        assert_eq!(config.server.public_url.as_deref(), Some("https://natours.example"));
        assert_eq!(config.email.port, 587);
    }

    #[test]
    fn test_production_without_secret_fails() {
        assert!(Config::build("production", overrides(&[])).is_err());
    }

    #[test]
    fn test_production_rejects_development_secret() {
        let result = Config::build(
            "production",
            overrides(&[("JWT__SECRET", DEVELOPMENT_JWT_SECRET)]),
        );

        assert!(matches!(result, Err(ConfigError::Message(_))));
    }

    #[test]
    fn test_production_rejects_short_secret() {
        let result = Config::build("production", overrides(&[("JWT__SECRET", "short")]));

        assert!(matches!(result, Err(ConfigError::Message(_))));
    }
}
