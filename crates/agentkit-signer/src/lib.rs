// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signing identity for AgentKit.
//!
//! A [`ConnectionDescriptor`] holds the key name, secret, and optional RPC
//! endpoint of a kit. It signs messages with an Ed25519 [`SigningKeypair`]
//! when the secret is a usable private key and falls back to a flagged,
//! deterministic digest otherwise.

pub mod connection;
pub mod keypair;

pub use connection::{ConnectionDescriptor, MessageSignature};
pub use keypair::SigningKeypair;
