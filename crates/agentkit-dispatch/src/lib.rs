// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Action dispatch for AgentKit.
//!
//! [`AgentKit`] holds the provider registry, the tool bindings, and the
//! connection descriptor, and can expose itself over HTTP through
//! `agentkit-gateway`.

pub mod kit;
pub mod remote;
pub mod tool;

pub use kit::{AgentKit, KitOptions, ENDPOINT_TOOL};
pub use remote::RemoteClient;
pub use tool::{LocalToolFn, RemoteTool, ToolBinding, ToolRegistry};
