// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The [`AgentKit`] dispatcher.
//!
//! Routes `(provider, action, params)` to a registered [`ActionProvider`],
//! routes named tool calls to local functions or remote endpoints, and owns
//! the lifecycle of the HTTP endpoint that exposes it to other processes.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, Weak};
use std::time::Duration;

use agentkit_core::{
    ActionProvider, EndpointInfo, KitError, Params, PerformRequest, PerformTarget,
};
use agentkit_gateway::{bind, Endpoint, EndpointState};
use agentkit_signer::ConnectionDescriptor;
use arc_swap::ArcSwap;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::remote::RemoteClient;
use crate::tool::{LocalToolFn, RemoteTool, ToolBinding, ToolRegistry};

/// Tool name bound to the kit's own endpoint once it is live.
pub const ENDPOINT_TOOL: &str = "mcp";

/// Timing knobs for remote calls and endpoint startup.
#[derive(Debug, Clone)]
pub struct KitOptions {
    /// Bound on each remote tool call.
    pub remote_timeout: Duration,
    /// Liveness probes attempted before giving up on a starting endpoint.
    pub probe_attempts: u32,
    /// Pause between liveness probes.
    pub probe_interval: Duration,
    /// Bound on each liveness probe.
    pub probe_timeout: Duration,
    /// How long a stopping endpoint may take to drain.
    pub stop_grace: Duration,
}

impl Default for KitOptions {
    fn default() -> Self {
        Self {
            remote_timeout: Duration::from_secs(15),
            probe_attempts: 40,
            probe_interval: Duration::from_millis(50),
            probe_timeout: Duration::from_millis(500),
            stop_grace: Duration::from_secs(5),
        }
    }
}

struct Inner {
    providers: RwLock<HashMap<String, Arc<dyn ActionProvider>>>,
    tools: RwLock<ToolRegistry>,
    connection: ArcSwap<ConnectionDescriptor>,
    remote: RemoteClient,
    options: KitOptions,
    endpoint: Mutex<Option<Endpoint>>,
}

/// Action dispatcher. Cloning is cheap and every clone shares the same
/// registries, connection, and endpoint.
#[derive(Clone)]
pub struct AgentKit {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for AgentKit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentKit")
            .field("providers", &self.provider_names())
            .field("tools", &self.tool_names())
            .field("connection", &self.connection())
            .finish()
    }
}

impl AgentKit {
    /// Creates a kit with default options.
    pub fn new(connection: ConnectionDescriptor) -> Result<Self, KitError> {
        Self::with_options(connection, KitOptions::default())
    }

    pub fn with_options(
        connection: ConnectionDescriptor,
        options: KitOptions,
    ) -> Result<Self, KitError> {
        let remote = RemoteClient::new(options.remote_timeout)?;
        Ok(Self {
            inner: Arc::new(Inner {
                providers: RwLock::new(HashMap::new()),
                tools: RwLock::new(ToolRegistry::new()),
                connection: ArcSwap::from_pointee(connection),
                remote,
                options,
                endpoint: Mutex::new(None),
            }),
        })
    }

    pub fn options(&self) -> &KitOptions {
        &self.inner.options
    }

    // --- providers ---

    /// Registers `provider` under its own name, replacing any previous one.
    pub fn register_provider(&self, provider: Arc<dyn ActionProvider>) {
        let name = provider.name().to_string();
        let previous = self
            .inner
            .providers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.clone(), provider);
        if previous.is_some() {
            warn!(provider = %name, "replacing provider");
        } else {
            info!(provider = %name, "registered provider");
        }
    }

    /// Removes a provider. Returns whether one was registered.
    pub fn unregister_provider(&self, name: &str) -> bool {
        let removed = self
            .inner
            .providers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some();
        if removed {
            info!(provider = %name, "unregistered provider");
        }
        removed
    }

    pub fn get_provider(&self, name: &str) -> Option<Arc<dyn ActionProvider>> {
        self.inner
            .providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Sorted names of registered providers.
    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Dispatches an action to the named provider.
    ///
    /// The provider's result or error is returned unchanged.
    pub async fn perform(
        &self,
        provider: &str,
        action: &str,
        params: Params,
    ) -> Result<Value, KitError> {
        let target = self
            .get_provider(provider)
            .ok_or_else(|| KitError::ProviderNotFound(provider.to_string()))?;
        debug!(provider, action, "perform");
        target.perform(action, params).await
    }

    // --- tools ---

    fn bind_tool(&self, name: &str, binding: ToolBinding) {
        let previous = self
            .inner
            .tools
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(name, binding);
        if previous.is_some() {
            warn!(tool = %name, "replacing tool");
        } else {
            info!(tool = %name, "registered tool");
        }
    }

    /// Binds `name` to an in-process function.
    pub fn register_local_tool<F>(&self, name: &str, f: F)
    where
        F: Fn(&str, &str, Params) -> Result<Value, KitError> + Send + Sync + 'static,
    {
        let f: LocalToolFn = Arc::new(f);
        self.bind_tool(name, ToolBinding::Local(f));
    }

    /// Binds `name` to a remote endpoint reachable at `base_url`.
    pub fn register_remote_tool(&self, name: &str, base_url: &str, credential: Option<String>) {
        self.bind_tool(name, ToolBinding::Remote(RemoteTool::new(base_url, credential)));
    }

    /// Removes a tool binding. Returns whether one existed.
    pub fn unregister_tool(&self, name: &str) -> bool {
        self.inner
            .tools
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some()
    }

    pub fn get_tool(&self, name: &str) -> Option<ToolBinding> {
        self.inner
            .tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
    }

    /// Sorted names of bound tools.
    pub fn tool_names(&self) -> Vec<String> {
        self.inner
            .tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .names()
    }

    /// Invokes a tool with `(provider, action, params)`.
    ///
    /// Local tools return whatever the function returns. Remote tools return
    /// the endpoint's response body unmodified, envelope included.
    pub async fn perform_tool(
        &self,
        tool: &str,
        provider: &str,
        action: &str,
        params: Params,
    ) -> Result<Value, KitError> {
        let binding = self
            .get_tool(tool)
            .ok_or_else(|| KitError::ToolNotFound(tool.to_string()))?;
        debug!(tool, provider, action, remote = binding.is_remote(), "perform tool");
        match binding {
            ToolBinding::Local(f) => f(provider, action, params),
            ToolBinding::Remote(remote) => {
                let request = PerformRequest::new(provider, action, params);
                self.inner.remote.perform(&remote, &request).await
            }
        }
    }

    // --- connection ---

    /// The connection descriptor currently in use.
    pub fn connection(&self) -> Arc<ConnectionDescriptor> {
        self.inner.connection.load_full()
    }

    /// Swaps the connection descriptor. In-flight calls keep the old one.
    pub fn replace_connection(&self, connection: ConnectionDescriptor) {
        info!(key_name = %connection.key_name(), "replacing connection");
        self.inner.connection.store(Arc::new(connection));
    }

    /// Sorted provider names plus a description of the connection.
    pub fn info(&self) -> EndpointInfo {
        EndpointInfo {
            providers: self.provider_names(),
            connection: self.connection().describe(),
        }
    }

    // --- endpoint ---

    /// Starts an HTTP endpoint serving this kit and waits until it answers.
    ///
    /// With `port` unset the OS picks a free port. Once live, the endpoint is
    /// bound as tool [`ENDPOINT_TOOL`] and its base URL is returned. A running
    /// endpoint is stopped first.
    pub async fn start_remote_endpoint(
        &self,
        host: &str,
        port: Option<u16>,
        credential: Option<String>,
    ) -> Result<String, KitError> {
        let options = &self.inner.options;
        let base_url = {
            let mut slot = self.inner.endpoint.lock().await;
            if let Some(previous) = slot.take() {
                info!(base_url = %previous.base_url(), "stopping previous endpoint");
                previous.stop(options.stop_grace).await;
            }

            let listener = bind(host, port).await?;
            let target = Arc::new(EndpointTarget(Arc::downgrade(&self.inner)));
            let endpoint = Endpoint::spawn(
                listener,
                EndpointState::new(target, credential.clone()),
            )?;
            let base_url = endpoint.base_url().to_string();
            *slot = Some(endpoint);
            base_url
        };

        let mut live = false;
        for attempt in 1..=options.probe_attempts {
            if self.inner.remote.probe(&base_url, options.probe_timeout).await {
                debug!(%base_url, attempt, "endpoint answered probe");
                live = true;
                break;
            }
            tokio::time::sleep(options.probe_interval).await;
        }
        if !live {
            warn!(%base_url, attempts = options.probe_attempts, "endpoint never became live");
            return Err(KitError::EndpointStartTimeout {
                base_url,
                attempts: options.probe_attempts,
            });
        }

        self.register_remote_tool(ENDPOINT_TOOL, &base_url, credential);
        info!(%base_url, "remote endpoint started");
        Ok(base_url)
    }

    /// Stops the running endpoint, letting in-flight requests finish.
    /// Does nothing when no endpoint is running.
    pub async fn stop_remote_endpoint(&self) {
        let endpoint = self.inner.endpoint.lock().await.take();
        if let Some(endpoint) = endpoint {
            endpoint.stop(self.inner.options.stop_grace).await;
        }
    }

    /// Base URL of the running endpoint, if any.
    pub async fn endpoint_base_url(&self) -> Option<String> {
        self.inner
            .endpoint
            .lock()
            .await
            .as_ref()
            .map(|e| e.base_url().to_string())
    }
}

#[async_trait]
impl PerformTarget for AgentKit {
    async fn perform(
        &self,
        provider: &str,
        action: &str,
        params: Params,
    ) -> Result<Value, KitError> {
        AgentKit::perform(self, provider, action, params).await
    }

    async fn info(&self) -> EndpointInfo {
        AgentKit::info(self)
    }
}

/// What the kit's own endpoint serves. Holds the kit weakly so a running
/// endpoint does not keep a dropped kit alive.
struct EndpointTarget(Weak<Inner>);

impl EndpointTarget {
    fn kit(&self) -> Result<AgentKit, KitError> {
        self.0
            .upgrade()
            .map(|inner| AgentKit { inner })
            .ok_or_else(|| KitError::Internal("dispatcher has been dropped".to_string()))
    }
}

#[async_trait]
impl PerformTarget for EndpointTarget {
    async fn perform(
        &self,
        provider: &str,
        action: &str,
        params: Params,
    ) -> Result<Value, KitError> {
        self.kit()?.perform(provider, action, params).await
    }

    async fn info(&self) -> EndpointInfo {
        match self.kit() {
            Ok(kit) => kit.info(),
            Err(_) => EndpointInfo {
                providers: Vec::new(),
                connection: agentkit_core::ConnectionInfo {
                    key_name: String::new(),
                    endpoint: None,
                    connected: false,
                },
            },
        }
    }
}
