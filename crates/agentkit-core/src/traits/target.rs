// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dispatch surface an HTTP endpoint serves.

use async_trait::async_trait;

use crate::error::KitError;
use crate::types::{EndpointInfo, Params};

/// Anything that can route a perform-request to a provider.
///
/// The HTTP endpoint depends only on this trait, so it can serve a
/// dispatcher without depending on the dispatcher crate.
#[async_trait]
pub trait PerformTarget: Send + Sync + 'static {
    /// Routes `(provider, action, params)` and returns the provider's result.
    async fn perform(
        &self,
        provider: &str,
        action: &str,
        params: Params,
    ) -> Result<serde_json::Value, KitError>;

    /// Returns the introspection payload for `GET /mcp/info`.
    async fn info(&self) -> EndpointInfo;
}
