// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential middleware for the perform route.
//!
//! When a credential is configured, requests must carry it in the
//! `x-api-key` header. Rejection happens before the body is read, so a
//! rejected request never reaches provider dispatch. With no credential
//! configured every request passes.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use agentkit_core::ErrorDetail;

/// Header carrying the caller's credential.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Authentication configuration for the endpoint.
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Expected `x-api-key` value. `None` disables the check.
    pub credential: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("credential", &self.credential.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

/// Rejects requests whose `x-api-key` does not match the configured credential.
pub async fn credential_middleware(
    State(auth): State<AuthConfig>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = auth.credential.as_deref() else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if provided == Some(expected) {
        return next.run(request).await;
    }

    tracing::debug!(present = provided.is_some(), "perform request rejected: bad credential");
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorDetail {
            detail: "invalid API key".to_string(),
        }),
    )
        .into_response()
}
