// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./agentkit.toml` > `~/.config/agentkit/agentkit.toml` > `/etc/agentkit/agentkit.toml`
//! with environment variable overrides via `AGENTKIT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::AgentKitConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/agentkit/agentkit.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "agentkit.toml";

/// Path of the per-user config file, if a config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("agentkit/agentkit.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/agentkit/agentkit.toml` (system-wide)
/// 3. `~/.config/agentkit/agentkit.toml` (user XDG config)
/// 4. `./agentkit.toml` (local directory)
/// 5. `AGENTKIT_*` environment variables
pub fn load_config() -> Result<AgentKitConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AgentKitConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<AgentKitConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AgentKitConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AgentKitConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AgentKitConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Maps a lowercased, prefix-stripped env var name to a dotted config key.
///
/// Only the first underscore after a section name is a separator, so
/// `connection_key_name` becomes `connection.key_name`.
pub(crate) fn env_key(key: &str) -> String {
    for section in ["connection", "endpoint", "remote", "logging"] {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

/// Environment provider using explicit section mapping rather than `split("_")`.
fn env_provider() -> Env {
    Env::prefixed("AGENTKIT_").map(|key| env_key(key.as_str()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(env_key("connection_key_name"), "connection.key_name");
        assert_eq!(env_key("endpoint_probe_attempts"), "endpoint.probe_attempts");
        assert_eq!(env_key("remote_timeout_secs"), "remote.timeout_secs");
        assert_eq!(env_key("logging_level"), "logging.level");
    }

    #[test]
    fn unknown_env_section_is_left_alone() {
        assert_eq!(env_key("something_else"), "something_else");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config_from_path(Path::new("/nonexistent/agentkit.toml")).unwrap();
        assert_eq!(config.endpoint.host, "127.0.0.1");
    }
}
