// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for AgentKit.
//!
//! This crate provides the error taxonomy, the wire types of the perform
//! contract, and the traits that providers and dispatch targets implement.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{BoxError, ErrorKind, KitError};
pub use traits::{ActionProvider, PerformTarget};
pub use types::{
    params, ConnectionInfo, EndpointInfo, ErrorDetail, Params, PerformRequest, PerformResponse,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_traits_are_exported() {
        // Fails to compile if either trait stops being object-safe.
        fn _assert_provider(_: &dyn ActionProvider) {}
        fn _assert_target(_: &dyn PerformTarget) {}
    }

    #[test]
    fn kit_error_is_send_and_sync() {
        fn _assert<T: Send + Sync + 'static>() {}
        _assert::<KitError>();
    }
}
