// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by providers, the dispatcher, and the HTTP endpoint.

use serde::{Deserialize, Serialize};

/// Keyword arguments of a perform call.
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Descriptive view of a connection descriptor. Never contains the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub key_name: String,
    pub endpoint: Option<String>,
    pub connected: bool,
}

/// The unit of dispatch, as carried over the wire by `POST /mcp/perform`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformRequest {
    pub provider: String,
    pub action: String,
    #[serde(default)]
    pub params: Params,
}

impl PerformRequest {
    /// Creates a request with the given params.
    pub fn new(provider: impl Into<String>, action: impl Into<String>, params: Params) -> Self {
        Self {
            provider: provider.into(),
            action: action.into(),
            params,
        }
    }
}

/// Successful perform envelope returned by the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformResponse {
    pub ok: bool,
    pub result: serde_json::Value,
}

impl PerformResponse {
    pub fn ok(result: serde_json::Value) -> Self {
        Self { ok: true, result }
    }
}

/// Error body returned by the endpoint for any failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Introspection payload served by `GET /mcp/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointInfo {
    /// Registered provider names, sorted.
    pub providers: Vec<String>,
    pub connection: ConnectionInfo,
}

/// Builds a [`Params`] map from a JSON object literal.
///
/// Non-object values yield an empty map.
pub fn params(value: serde_json::Value) -> Params {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Params::new(),
    }
}
