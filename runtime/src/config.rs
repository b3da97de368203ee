//! EngineConfig - Host-Tunable Settings

use serde::{Deserialize, Serialize};

/// Engine settings a host may override from its own config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Namespace prefix for shared-tier keys in the adapter.
    pub shared_prefix: String,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub env_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            shared_prefix: wayline_core::SHARED_PREFIX.to_string(),
            env_filter: "info,wayline_core=debug".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = EngineConfig::from_toml_str(r#"shared_prefix = "app:""#).unwrap();

        assert_eq!(config.shared_prefix, "app:");
        assert_eq!(config.env_filter, EngineConfig::default().env_filter);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config.shared_prefix, "shared:");
    }
}
