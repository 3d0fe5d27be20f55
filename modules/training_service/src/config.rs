//! Configuration for training service module

use serde::Deserialize;

/// Training service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HMAC secret used to sign bearer tokens
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Bearer token lifetime (seconds)
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,

    /// Minimum accepted password length on user creation
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Administrator created at startup when its email is not yet registered
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Initial administrator account
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BootstrapAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_secs: default_token_ttl_secs(),
            min_password_length: default_min_password_length(),
            bootstrap_admin: None,
        }
    }
}

const DEVELOPMENT_JWT_SECRET: &str = "change-me-training-portal-development-secret";

impl Config {
    /// Whether tokens would be signed with the publicly known fallback secret
    pub fn uses_default_jwt_secret(&self) -> bool {
        self.jwt_secret == DEVELOPMENT_JWT_SECRET
    }
}

fn default_jwt_secret() -> String {
    DEVELOPMENT_JWT_SECRET.to_string()
}

fn default_token_ttl_secs() -> i64 {
    86_400 // 24h
}

fn default_min_password_length() -> usize {
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_secret_is_detected() {
        assert!(Config::default().uses_default_jwt_secret());

        let configured = Config {
            jwt_secret: "deployment-secret".to_string(),
            ..Default::default()
        };
        assert!(!configured.uses_default_jwt_secret());
    }
}
