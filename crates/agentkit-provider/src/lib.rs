// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Action providers for AgentKit.
//!
//! - [`LedgerProvider`] -- simulated on-chain balances with `init`,
//!   `transfer`, `swap`, and signed `send_transaction`
//! - [`HandlerProvider`] -- off-chain actions backed by registered closures

pub mod args;
pub mod handler;
pub mod ledger;

pub use handler::{Handler, HandlerProvider};
pub use ledger::{Balances, Ledger, LedgerProvider, DEFAULT_TOKEN};
