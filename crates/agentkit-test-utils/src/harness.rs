// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a kit with a ledger provider and an off-chain
//! handler provider, optionally serving it over HTTP, so tests can drive
//! both the in-process and the remote paths.

use std::sync::Arc;

use agentkit_core::{params, KitError};
use agentkit_dispatch::{AgentKit, KitOptions};
use agentkit_provider::{HandlerProvider, LedgerProvider};
use agentkit_signer::ConnectionDescriptor;
use serde_json::Value;

use crate::fixtures;

/// Name of the harness ledger provider.
pub const ONCHAIN: &str = "onchain";

/// Name of the harness handler provider.
pub const OFFCHAIN: &str = "offchain";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    key_name: String,
    secret: String,
    chain_endpoint: Option<String>,
    credential: Option<String>,
    serve: bool,
    options: KitOptions,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            key_name: "test-key".to_string(),
            secret: "test-secret".to_string(),
            chain_endpoint: None,
            credential: None,
            serve: false,
            options: KitOptions::default(),
        }
    }

    /// Connection descriptor fields used for both the kit and the ledger.
    pub fn with_connection(
        mut self,
        key_name: &str,
        secret: &str,
        chain_endpoint: Option<&str>,
    ) -> Self {
        self.key_name = key_name.to_string();
        self.secret = secret.to_string();
        self.chain_endpoint = chain_endpoint.map(str::to_string);
        self
    }

    /// Start the HTTP endpoint on build.
    pub fn with_endpoint(mut self) -> Self {
        self.serve = true;
        self
    }

    /// Require `credential` on the endpoint. Implies [`with_endpoint`](Self::with_endpoint).
    pub fn with_credential(mut self, credential: &str) -> Self {
        self.credential = Some(credential.to_string());
        self.serve = true;
        self
    }

    pub fn with_options(mut self, options: KitOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the kit, register providers, and start the endpoint if asked.
    pub async fn build(self) -> Result<TestHarness, KitError> {
        let connection = || {
            ConnectionDescriptor::new(
                self.key_name.clone(),
                self.secret.clone(),
                self.chain_endpoint.clone(),
            )
        };

        let kit = AgentKit::with_options(connection(), self.options.clone())?;

        let ledger = Arc::new(LedgerProvider::new(ONCHAIN, Arc::new(connection())));
        let offchain = Arc::new(
            HandlerProvider::new(OFFCHAIN)
                .with_handler("echo", fixtures::echo)
                .with_handler("sum", fixtures::sum)
                .with_handler("fail", fixtures::fail),
        );
        kit.register_provider(ledger.clone());
        kit.register_provider(offchain.clone());

        let base_url = if self.serve {
            Some(
                kit.start_remote_endpoint("127.0.0.1", None, self.credential.clone())
                    .await?,
            )
        } else {
            None
        };

        Ok(TestHarness {
            kit,
            ledger,
            offchain,
            base_url,
        })
    }
}

/// A kit wired with test providers.
pub struct TestHarness {
    kit: AgentKit,
    ledger: Arc<LedgerProvider>,
    offchain: Arc<HandlerProvider>,
    base_url: Option<String>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    pub fn kit(&self) -> &AgentKit {
        &self.kit
    }

    pub fn ledger(&self) -> &LedgerProvider {
        &self.ledger
    }

    pub fn offchain(&self) -> &HandlerProvider {
        &self.offchain
    }

    /// Base URL of the endpoint, when started.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// In-process perform with params given as a JSON object.
    pub async fn perform(
        &self,
        provider: &str,
        action: &str,
        args: Value,
    ) -> Result<Value, KitError> {
        self.kit.perform(provider, action, params(args)).await
    }

    /// Perform through a named tool with params given as a JSON object.
    pub async fn perform_tool(
        &self,
        tool: &str,
        provider: &str,
        action: &str,
        args: Value,
    ) -> Result<Value, KitError> {
        self.kit
            .perform_tool(tool, provider, action, params(args))
            .await
    }

    /// Stops the endpoint, if any.
    pub async fn shutdown(self) {
        self.kit.stop_remote_endpoint().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn harness_registers_both_providers() {
        let h = TestHarness::builder().build().await.unwrap();
        assert_eq!(
            h.kit().provider_names(),
            vec![OFFCHAIN.to_string(), ONCHAIN.to_string()]
        );
        assert!(h.base_url().is_none());
        let r = h
            .perform(OFFCHAIN, "sum", json!({"a": 1, "b": 2}))
            .await
            .unwrap();
        assert_eq!(r, json!(3));
    }

    #[tokio::test]
    async fn harness_can_serve() {
        let h = TestHarness::builder().with_endpoint().build().await.unwrap();
        assert!(h.base_url().is_some());
        let r = h
            .perform_tool("mcp", OFFCHAIN, "echo", json!({"message": "hi"}))
            .await
            .unwrap();
        assert_eq!(r["result"]["echo"], "hi");
        h.shutdown().await;
    }
}
