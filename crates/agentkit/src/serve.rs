// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `agentkit serve`: expose the kit over HTTP until SIGINT/SIGTERM.

use agentkit_config::AgentKitConfig;
use agentkit_core::KitError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::kit::build_kit;

/// Command-line overrides for the `[endpoint]` section.
#[derive(Debug, Default)]
pub struct ServeArgs {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub credential: Option<String>,
}

/// Starts the endpoint and blocks until a shutdown signal arrives.
pub async fn run_serve(config: &AgentKitConfig, args: ServeArgs) -> Result<(), KitError> {
    let kit = build_kit(config)?;

    let host = args.host.unwrap_or_else(|| config.endpoint.host.clone());
    let port = args.port.or(config.endpoint.port);
    let credential = args.credential.or_else(|| config.endpoint.credential.clone());
    if credential.is_none() {
        warn!("no endpoint credential configured, /mcp/perform is open");
    }

    let cancel = install_signal_handler();
    let base_url = kit.start_remote_endpoint(&host, port, credential).await?;
    info!(%base_url, providers = ?kit.provider_names(), "agentkit serving");
    eprintln!("agentkit: serving on {base_url}");

    cancel.cancelled().await;
    kit.stop_remote_endpoint().await;
    info!("agentkit stopped");
    Ok(())
}

/// Cancels the returned token on SIGINT or SIGTERM.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = ctrl_c => info!("received SIGINT (Ctrl+C), shutting down"),
                        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
                    }
                }
                Err(e) => {
                    warn!("failed to install SIGTERM handler: {e}");
                    let _ = ctrl_c.await;
                    info!("received SIGINT (Ctrl+C), shutting down");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, shutting down");
        }

        token_clone.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}
