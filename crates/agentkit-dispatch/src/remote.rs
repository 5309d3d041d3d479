// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for remote tools and endpoint liveness probes.

use std::time::Duration;

use agentkit_core::{KitError, PerformRequest};
use agentkit_gateway::API_KEY_HEADER;
use serde_json::Value;
use tracing::debug;

use crate::tool::RemoteTool;

/// Client for calling `POST {base}/mcp/perform` on remote endpoints.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: reqwest::Client,
}

impl RemoteClient {
    /// Builds a client whose calls fail after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, KitError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| KitError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Forwards a perform request and returns the decoded response body as-is.
    pub async fn perform(
        &self,
        remote: &RemoteTool,
        request: &PerformRequest,
    ) -> Result<Value, KitError> {
        let url = format!("{}/mcp/perform", remote.base_url());
        debug!(%url, provider = %request.provider, action = %request.action, "remote perform");

        let mut builder = self.client.post(&url).json(request);
        if let Some(key) = remote.credential() {
            builder = builder.header(API_KEY_HEADER, key);
        }

        let response = builder.send().await.map_err(|e| KitError::RemoteTool {
            status: None,
            body: format!("request to {url} failed: {e}"),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("failed to read response body from {url}: {e}"));
            return Err(KitError::RemoteTool {
                status: Some(status.as_u16()),
                body,
            });
        }

        response.json::<Value>().await.map_err(|e| KitError::RemoteTool {
            status: None,
            body: format!("invalid response from {url}: {e}"),
        })
    }

    /// True if `GET {base}/mcp/info` answers with a success status within `timeout`.
    pub async fn probe(&self, base_url: &str, timeout: Duration) -> bool {
        match self
            .client
            .get(format!("{base_url}/mcp/info"))
            .timeout(timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
