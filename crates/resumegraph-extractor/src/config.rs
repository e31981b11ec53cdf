//! Configuration for the extraction orchestrator

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the extraction orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Maximum input document length (characters)
    pub max_document_chars: usize,

    /// Maximum time for a single inference proposal call (seconds)
    pub proposal_timeout_secs: u64,
}

impl OrchestratorConfig {
    /// Get the proposal timeout as a Duration
    pub fn proposal_timeout(&self) -> Duration {
        Duration::from_secs(self.proposal_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_document_chars == 0 {
            return Err("max_document_chars must be greater than 0".to_string());
        }
        if self.proposal_timeout_secs == 0 {
            return Err("proposal_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_document_chars: 100_000,
            proposal_timeout_secs: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(OrchestratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_max_document_chars() {
        let mut config = OrchestratorConfig::default();
        config.max_document_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_timeout() {
        let mut config = OrchestratorConfig::default();
        config.proposal_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = OrchestratorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = OrchestratorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.max_document_chars, parsed.max_document_chars);
        assert_eq!(config.proposal_timeout_secs, parsed.proposal_timeout_secs);
    }
}
