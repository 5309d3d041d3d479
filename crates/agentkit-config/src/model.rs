// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for AgentKit.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level AgentKit configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentKitConfig {
    /// Connection descriptor used for signing.
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// HTTP endpoint settings.
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Remote tool client settings.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection descriptor configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    /// Key identifier reported by `/mcp/info`.
    #[serde(default = "default_key_name")]
    pub key_name: String,

    /// Signing secret. A 32-byte hex value enables real Ed25519 signatures.
    #[serde(default)]
    pub secret: Option<String>,

    /// Chain endpoint URL, informational only.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            key_name: default_key_name(),
            secret: None,
            endpoint: None,
        }
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("key_name", &self.key_name)
            .field("secret", &self.secret.as_ref().map(|_| "[redacted]"))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

fn default_key_name() -> String {
    "agentkit".to_string()
}

/// HTTP endpoint configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind. Unset picks a free port.
    #[serde(default)]
    pub port: Option<u16>,

    /// Expected `x-api-key` value for `/mcp/perform`. Unset disables the check.
    #[serde(default)]
    pub credential: Option<String>,

    /// Liveness probes attempted at startup.
    #[serde(default = "default_probe_attempts")]
    pub probe_attempts: u32,

    /// Milliseconds between liveness probes.
    #[serde(default = "default_probe_interval_ms")]
    pub probe_interval_ms: u64,

    /// Per-probe timeout in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: None,
            credential: None,
            probe_attempts: default_probe_attempts(),
            probe_interval_ms: default_probe_interval_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

impl std::fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("credential", &self.credential.as_ref().map(|_| "[redacted]"))
            .field("probe_attempts", &self.probe_attempts)
            .field("probe_interval_ms", &self.probe_interval_ms)
            .field("probe_timeout_ms", &self.probe_timeout_ms)
            .finish()
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_probe_attempts() -> u32 {
    40
}

fn default_probe_interval_ms() -> u64 {
    50
}

fn default_probe_timeout_ms() -> u64 {
    500
}

/// Remote tool client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Timeout for each remote tool call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
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

fn default_log_level() -> String {
    "info".to_string()
}
