//! Layered server configuration: defaults, optional YAML file, `TRAINING__` env vars

use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;

/// Environment variable prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "TRAINING__";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub training: training_service::Config,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SeaORM connection URL (sqlite or postgres)
    pub url: String,

    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://training.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration; later sources override earlier ones
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Ok(Self::figment(path).extract()?)
    }

    pub(crate) fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let cfg: AppConfig = AppConfig::figment(None).extract()?;
            assert_eq!(cfg.server.bind_addr, "0.0.0.0:8080");
            assert_eq!(cfg.database.url, "sqlite://training.db?mode=rwc");
            assert_eq!(cfg.logging.level, "info");
            assert!(!cfg.logging.json);
            assert_eq!(cfg.training.token_ttl_secs, 86_400);
            assert_eq!(cfg.training.min_password_length, 6);
            Ok(())
        });
    }

    #[test]
    fn yaml_file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "training.yaml",
                r#"
server:
  bind_addr: "127.0.0.1:9000"
logging:
  json: true
training:
  jwt_secret: "from-file"
  bootstrap_admin:
    name: "Root"
    email: "root@example.com"
    password: "changeme"
"#,
            )?;
            jail.set_env("TRAINING__SERVER__BIND_ADDR", "127.0.0.1:9100");
            jail.set_env("TRAINING__TRAINING__MIN_PASSWORD_LENGTH", "10");

            let cfg: AppConfig = AppConfig::figment(Some(Path::new("training.yaml"))).extract()?;
            assert_eq!(cfg.server.bind_addr, "127.0.0.1:9100");
            assert!(cfg.logging.json);
            assert_eq!(cfg.training.jwt_secret, "from-file");
            assert_eq!(cfg.training.min_password_length, 10);
            let admin = cfg.training.bootstrap_admin.expect("bootstrap admin");
            assert_eq!(admin.email, "root@example.com");
            Ok(())
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("training.yaml", "server:\n  port: 80\n")?;
            assert!(AppConfig::load(Some(Path::new("training.yaml"))).is_err());
            Ok(())
        });
    }
}
