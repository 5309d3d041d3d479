// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the seams between providers, the dispatcher, and
//! the HTTP endpoint.

pub mod provider;
pub mod target;

pub use provider::ActionProvider;
pub use target::PerformTarget;
