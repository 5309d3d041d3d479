// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for AgentKit integration tests.

pub mod fixtures;
pub mod harness;

pub use fixtures::RecordingTool;
pub use harness::{TestHarness, TestHarnessBuilder, OFFCHAIN, ONCHAIN};
