// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP endpoint exposing a dispatcher's perform contract.
//!
//! The gateway knows nothing about providers or tools. It serves any
//! [`PerformTarget`](agentkit_core::PerformTarget) over two routes,
//! `GET /mcp/info` and `POST /mcp/perform`, plus a public `GET /health`.

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::{AuthConfig, API_KEY_HEADER};
pub use handlers::status_for;
pub use server::{bind, router, Endpoint, EndpointState};
