// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid host names, positive timeouts, and known log levels.

use crate::diagnostic::ConfigError;
use crate::model::AgentKitConfig;

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &AgentKitConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.connection.key_name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "connection.key_name must not be empty".to_string(),
        });
    }

    let host = config.endpoint.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "endpoint.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("endpoint.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.endpoint.probe_attempts < 1 {
        errors.push(ConfigError::Validation {
            message: "endpoint.probe_attempts must be at least 1".to_string(),
        });
    }

    if config.endpoint.probe_timeout_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "endpoint.probe_timeout_ms must be greater than 0".to_string(),
        });
    }

    if config.remote.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "remote.timeout_secs must be greater than 0".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&AgentKitConfig::default()).is_ok());
    }

    #[test]
    fn empty_key_name_fails_validation() {
        let mut config = AgentKitConfig::default();
        config.connection.key_name = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "key_name"));
    }

    #[test]
    fn bad_host_fails_validation() {
        let mut config = AgentKitConfig::default();
        config.endpoint.host = "not a host!".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "endpoint.host"));
    }

    #[test]
    fn ipv6_and_hostnames_are_accepted() {
        let mut config = AgentKitConfig::default();
        config.endpoint.host = "::1".to_string();
        assert!(validate_config(&config).is_ok());
        config.endpoint.host = "localhost".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_timeouts_fail_validation() {
        let mut config = AgentKitConfig::default();
        config.remote.timeout_secs = 0;
        config.endpoint.probe_attempts = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "remote.timeout_secs"));
        assert!(has_error(&errors, "probe_attempts"));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = AgentKitConfig::default();
        config.logging.level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "logging.level"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = AgentKitConfig::default();
        config.connection.key_name = String::new();
        config.remote.timeout_secs = 0;
        config.logging.level = "loud".to_string();
        assert_eq!(validate_config(&config).unwrap_err().len(), 3);
    }
}
