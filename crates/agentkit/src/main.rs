// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AgentKit - action dispatch for agents.
//!
//! Binary entry point: serve a kit over HTTP, run the scripted demo, or
//! print what a configured kit exposes.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod demo;
mod kit;
mod serve;

use std::path::PathBuf;

use agentkit_config::AgentKitConfig;
use clap::{Parser, Subcommand};

/// AgentKit - action dispatch for agents.
#[derive(Parser, Debug)]
#[command(name = "agentkit", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the kit's perform endpoint until interrupted.
    Serve {
        /// Address to bind (overrides endpoint.host).
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides endpoint.port; unset picks a free port).
        #[arg(long)]
        port: Option<u16>,
        /// Required x-api-key value (overrides endpoint.credential).
        #[arg(long)]
        credential: Option<String>,
    },
    /// Run a scripted walkthrough of ledger, handler, and tool calls.
    Demo,
    /// Print the providers and connection the kit exposes.
    Info,
}

fn load_config(path: Option<&std::path::Path>) -> AgentKitConfig {
    let loaded = match path {
        Some(path) => agentkit_config::load_and_validate_path(path),
        None => agentkit_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            agentkit_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` wins over `log_level`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("agentkit={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());
    init_tracing(&config.logging.level);

    let result = match cli.command {
        Some(Commands::Serve {
            host,
            port,
            credential,
        }) => {
            let args = serve::ServeArgs {
                host,
                port,
                credential,
            };
            serve::run_serve(&config, args).await
        }
        Some(Commands::Demo) => demo::run_demo(&config).await.map(|steps| {
            for (step, value) in steps {
                println!("{step}: {value}");
            }
        }),
        Some(Commands::Info) => kit::build_kit(&config).and_then(|kit| {
            serde_json::to_string_pretty(&kit.info())
                .map(|json| println!("{json}"))
                .map_err(|e| agentkit_core::KitError::Internal(e.to_string()))
        }),
        None => {
            println!("agentkit: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("agentkit: {e}");
        std::process::exit(1);
    }
}
