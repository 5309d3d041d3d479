// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Action provider trait.

use async_trait::async_trait;

use crate::error::KitError;
use crate::types::Params;

/// A named unit that executes a fixed set of named actions.
///
/// Providers are registered into a dispatcher under [`name`](Self::name) and
/// receive every perform-request addressed to that name. Implementations must
/// be safe to call concurrently: any internal state they mutate is guarded by
/// the provider itself.
#[async_trait]
pub trait ActionProvider: Send + Sync + 'static {
    /// Returns the registry name of this provider.
    fn name(&self) -> &str;

    /// Lists the actions this provider understands, sorted.
    ///
    /// Informational only; [`perform`](Self::perform) is the authority on
    /// which actions exist.
    fn actions(&self) -> Vec<String> {
        Vec::new()
    }

    /// Executes `action` with the given keyword arguments.
    async fn perform(&self, action: &str, params: Params) -> Result<serde_json::Value, KitError>;
}
