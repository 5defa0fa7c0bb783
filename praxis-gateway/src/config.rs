//! Gateway configuration.

use serde::{Deserialize, Serialize};

/// Environment variable holding the listen address.
pub const LISTEN_ADDR_ENV: &str = "PRAXIS_LISTEN_ADDR";

/// Environment variable selecting the `GET /cpf` query parameter name.
pub const QUERY_FIELD_ENV: &str = "PRAXIS_QUERY_FIELD";

/// Query parameter names accepted on `GET /cpf`.
pub const SUPPORTED_QUERY_FIELDS: [&str; 2] = ["cpf", "numero"];

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// `PRAXIS_QUERY_FIELD` names a parameter other than `cpf` or `numero`.
    #[error("unsupported query field '{0}'; expected 'cpf' or 'numero'")]
    UnsupportedQueryField(String),
}

/// Runtime settings for the HTTP provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// Socket address to bind, e.g. `127.0.0.1:8000`.
    pub listen_addr: String,

    /// Name of the query parameter carrying the CPF on `GET /cpf`.
    pub query_field: String,
}

impl GatewayConfig {
    /// Create a config with the given query field and the default address.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedQueryField`] unless `query_field` is
    /// `cpf` or `numero`.
    pub fn with_query_field(query_field: impl Into<String>) -> Result<Self, ConfigError> {
        let query_field = query_field.into();
        if !SUPPORTED_QUERY_FIELDS.contains(&query_field.as_str()) {
            return Err(ConfigError::UnsupportedQueryField(query_field));
        }
        Ok(Self { query_field, ..Self::default() })
    }

    /// Load settings from `PRAXIS_LISTEN_ADDR` and `PRAXIS_QUERY_FIELD`,
    /// falling back to defaults for unset variables.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedQueryField`] for an unknown field name.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup(QUERY_FIELD_ENV) {
            Some(field) => Self::with_query_field(field)?,
            None => Self::default(),
        };
        if let Some(addr) = lookup(LISTEN_ADDR_ENV) {
            config.listen_addr = addr;
        }
        Ok(config)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8000".to_owned(),
            query_field: "cpf".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_lookup_empty_env_uses_defaults() {
        let config = match GatewayConfig::from_lookup(|_| None) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config, GatewayConfig::default());
    }

    #[test]
    fn from_lookup_reads_both_variables() {
        let config = GatewayConfig::from_lookup(|key| match key {
            LISTEN_ADDR_ENV => Some("0.0.0.0:9000".to_owned()),
            QUERY_FIELD_ENV => Some("numero".to_owned()),
            _ => None,
        });
        let config = match config {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config.listen_addr, "0.0.0.0:9000");
        assert_eq!(config.query_field, "numero");
    }

    #[test]
    fn with_query_field_rejects_unknown_name() {
        let err = GatewayConfig::with_query_field("id");
        assert!(
            matches!(err, Err(ConfigError::UnsupportedQueryField(ref f)) if f == "id"),
            "unknown field must be rejected, got {err:?}"
        );
    }
}
