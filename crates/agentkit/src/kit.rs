// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the kit the binary serves from configuration.

use std::sync::Arc;
use std::time::Duration;

use agentkit_config::model::ConnectionConfig;
use agentkit_config::AgentKitConfig;
use agentkit_core::{BoxError, KitError, Params};
use agentkit_dispatch::{AgentKit, KitOptions};
use agentkit_provider::{HandlerProvider, LedgerProvider};
use agentkit_signer::ConnectionDescriptor;
use serde_json::{json, Value};

pub const ONCHAIN: &str = "onchain";
pub const OFFCHAIN: &str = "offchain";

/// `{"greeting": "hello <name>"}`, name defaulting to `world`.
pub fn hello(p: Params) -> Result<Value, BoxError> {
    let name = p.get("name").and_then(Value::as_str).unwrap_or("world");
    Ok(json!({"greeting": format!("hello {name}")}))
}

pub fn echo(p: Params) -> Result<Value, BoxError> {
    Ok(json!({"echo": p.get("message").cloned().unwrap_or(Value::Null)}))
}

pub fn connection(config: &ConnectionConfig) -> ConnectionDescriptor {
    ConnectionDescriptor::new(
        config.key_name.clone(),
        config.secret.clone().unwrap_or_default(),
        config.endpoint.clone(),
    )
}

pub fn kit_options(config: &AgentKitConfig) -> KitOptions {
    KitOptions {
        remote_timeout: Duration::from_secs(config.remote.timeout_secs),
        probe_attempts: config.endpoint.probe_attempts,
        probe_interval: Duration::from_millis(config.endpoint.probe_interval_ms),
        probe_timeout: Duration::from_millis(config.endpoint.probe_timeout_ms),
        ..KitOptions::default()
    }
}

/// A kit with a ledger provider and an off-chain handler provider.
pub fn build_kit(config: &AgentKitConfig) -> Result<AgentKit, KitError> {
    let kit = AgentKit::with_options(connection(&config.connection), kit_options(config))?;
    kit.register_provider(Arc::new(LedgerProvider::new(
        ONCHAIN,
        kit.connection(),
    )));
    kit.register_provider(Arc::new(
        HandlerProvider::new(OFFCHAIN)
            .with_handler("hello", hello)
            .with_handler("echo", echo),
    ));
    Ok(kit)
}
