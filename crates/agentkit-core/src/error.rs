// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the AgentKit dispatcher.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Boxed error returned by user-supplied handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The error type shared by providers, the dispatcher, and the HTTP endpoint.
#[derive(Debug, Error)]
pub enum KitError {
    /// A required argument was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A ledger debit would drive a balance below zero.
    #[error("insufficient balance: {address} holds {available} {token}, requested {requested}")]
    InsufficientBalance {
        address: String,
        token: String,
        available: f64,
        requested: f64,
    },

    /// The provider does not implement the requested action.
    #[error("unknown action `{action}` for provider `{provider}`")]
    UnknownAction { provider: String, action: String },

    /// No provider is registered under this name.
    #[error("provider not registered: {0}")]
    ProviderNotFound(String),

    /// No tool is registered under this name.
    #[error("tool not registered: {0}")]
    ToolNotFound(String),

    /// An off-chain handler failed. The handler's own error is kept as the source.
    #[error("handler `{provider}/{action}` failed: {source}")]
    Handler {
        provider: String,
        action: String,
        source: BoxError,
    },

    /// A remote tool call returned a non-success status or could not be completed.
    #[error("remote tool error{}: {body}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    RemoteTool { status: Option<u16>, body: String },

    /// The remote endpoint never answered its liveness probe.
    #[error("endpoint at {base_url} did not become ready after {attempts} probes")]
    EndpointStartTimeout { base_url: String, attempts: u32 },

    /// Binding or serving the HTTP endpoint failed.
    #[error("endpoint error: {message}")]
    Endpoint {
        message: String,
        source: Option<BoxError>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Stable classification of a [`KitError`], used in logs and by the endpoint
/// when choosing an HTTP status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    InsufficientBalance,
    UnknownAction,
    ProviderNotFound,
    ToolNotFound,
    HandlerError,
    RemoteToolError,
    EndpointStartTimeout,
    Endpoint,
    Internal,
}

impl KitError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            KitError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            KitError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            KitError::UnknownAction { .. } => ErrorKind::UnknownAction,
            KitError::ProviderNotFound(_) => ErrorKind::ProviderNotFound,
            KitError::ToolNotFound(_) => ErrorKind::ToolNotFound,
            KitError::Handler { .. } => ErrorKind::HandlerError,
            KitError::RemoteTool { .. } => ErrorKind::RemoteToolError,
            KitError::EndpointStartTimeout { .. } => ErrorKind::EndpointStartTimeout,
            KitError::Endpoint { .. } => ErrorKind::Endpoint,
            KitError::Internal(_) => ErrorKind::Internal,
        }
    }
}
