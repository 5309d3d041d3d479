// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the perform endpoint.
//!
//! Handles GET /mcp/info, POST /mcp/perform, GET /health.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use agentkit_core::{EndpointInfo, ErrorDetail, ErrorKind, KitError, PerformRequest, PerformResponse};

use crate::server::EndpointState;

/// Response body for GET /health.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since the endpoint started.
    pub uptime_secs: u64,
}

/// Maps a dispatch failure to the HTTP status returned to the caller.
pub fn status_for(err: &KitError) -> StatusCode {
    match err.kind() {
        ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorKind::ProviderNotFound | ErrorKind::UnknownAction => StatusCode::NOT_FOUND,
        ErrorKind::InsufficientBalance => StatusCode::CONFLICT,
        ErrorKind::RemoteToolError => StatusCode::BAD_GATEWAY,
        ErrorKind::HandlerError
        | ErrorKind::ToolNotFound
        | ErrorKind::EndpointStartTimeout
        | ErrorKind::Endpoint
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, detail: String) -> Response {
    (status, Json(ErrorDetail { detail })).into_response()
}

/// GET /mcp/info
///
/// Lists registered providers and the connection description. Also serves
/// as the liveness probe used when the endpoint starts.
pub async fn get_info(State(state): State<EndpointState>) -> Json<EndpointInfo> {
    Json(state.target.info().await)
}

/// POST /mcp/perform
///
/// Dispatches `{provider, action, params}` and wraps the result as
/// `{ok: true, result}`. Failures carry only the error message.
pub async fn post_perform(
    State(state): State<EndpointState>,
    body: Result<Json<PerformRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };

    match state
        .target
        .perform(&req.provider, &req.action, req.params)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(PerformResponse::ok(result))).into_response(),
        Err(err) => {
            let status = status_for(&err);
            if status.is_server_error() {
                tracing::error!(
                    provider = %req.provider,
                    action = %req.action,
                    kind = %err.kind(),
                    "perform failed: {err}"
                );
            } else {
                tracing::warn!(
                    provider = %req.provider,
                    action = %req.action,
                    kind = %err.kind(),
                    "perform rejected: {err}"
                );
            }
            error_response(status, err.to_string())
        }
    }
}

/// GET /health
pub async fn get_health(State(state): State<EndpointState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.started.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            status_for(&KitError::ProviderNotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&KitError::InvalidArgument("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&KitError::InsufficientBalance {
                address: "a".into(),
                token: "ETH".into(),
                available: 0.0,
                requested: 1.0,
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&KitError::Handler {
                provider: "p".into(),
                action: "a".into(),
                source: "x".into(),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 42,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"uptime_secs\":42"));
    }
}
