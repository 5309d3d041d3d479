// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named tool bindings.
//!
//! A tool is a name bound either to an in-process function or to a remote
//! endpoint's base URL. Both forms are invoked with the same
//! `(provider, action, params)` triple.

use std::collections::HashMap;
use std::sync::Arc;

use agentkit_core::{KitError, Params};
use serde_json::Value;

/// In-process tool function, called as `f(provider, action, params)`.
pub type LocalToolFn = Arc<dyn Fn(&str, &str, Params) -> Result<Value, KitError> + Send + Sync>;

/// Remote endpoint a tool forwards to.
#[derive(Clone)]
pub struct RemoteTool {
    base_url: String,
    credential: Option<String>,
}

impl RemoteTool {
    /// Trailing slashes on `base_url` are dropped.
    pub fn new(base_url: impl Into<String>, credential: Option<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credential,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }
}

impl std::fmt::Debug for RemoteTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteTool")
            .field("base_url", &self.base_url)
            .field("credential", &self.credential.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

/// What a tool name resolves to.
#[derive(Clone)]
pub enum ToolBinding {
    Local(LocalToolFn),
    Remote(RemoteTool),
}

impl ToolBinding {
    pub fn is_remote(&self) -> bool {
        matches!(self, ToolBinding::Remote(_))
    }
}

impl std::fmt::Debug for ToolBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolBinding::Local(_) => f.write_str("Local(<fn>)"),
            ToolBinding::Remote(remote) => f.debug_tuple("Remote").field(remote).finish(),
        }
    }
}

/// Registry of tool bindings, indexed by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolBinding>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, returning the binding it replaced.
    pub fn register(&mut self, name: impl Into<String>, binding: ToolBinding) -> Option<ToolBinding> {
        self.tools.insert(name.into(), binding)
    }

    pub fn remove(&mut self, name: &str) -> Option<ToolBinding> {
        self.tools.remove(name)
    }

    /// Looks up a binding by name.
    pub fn get(&self, name: &str) -> Option<ToolBinding> {
        self.tools.get(name).cloned()
    }

    /// Sorted tool names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn local(value: Value) -> ToolBinding {
        ToolBinding::Local(Arc::new(move |_, _, _| Ok(value.clone())))
    }

    #[test]
    fn register_and_get() {
        let mut reg = ToolRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.register("t", local(json!(1))).is_none());
        assert_eq!(reg.len(), 1);
        assert!(matches!(reg.get("t"), Some(ToolBinding::Local(_))));
        assert!(reg.get("missing").is_none());
    }

    #[test]
    fn register_replaces_existing_binding() {
        let mut reg = ToolRegistry::new();
        reg.register("t", local(json!(1)));
        let previous = reg.register("t", ToolBinding::Remote(RemoteTool::new("http://h:1", None)));
        assert!(matches!(previous, Some(ToolBinding::Local(_))));
        assert!(reg.get("t").unwrap().is_remote());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn names_are_sorted() {
        let mut reg = ToolRegistry::new();
        reg.register("zeta", local(Value::Null));
        reg.register("alpha", local(Value::Null));
        assert_eq!(reg.names(), vec!["alpha".to_string(), "zeta".to_string()]);
        assert!(reg.remove("alpha").is_some());
        assert_eq!(reg.names(), vec!["zeta".to_string()]);
    }

    #[test]
    fn remote_base_url_is_normalized() {
        let remote = RemoteTool::new("http://127.0.0.1:9000/", Some("k".into()));
        assert_eq!(remote.base_url(), "http://127.0.0.1:9000");
        assert_eq!(remote.credential(), Some("k"));
    }

    #[test]
    fn debug_redacts_credential() {
        let binding = ToolBinding::Remote(RemoteTool::new("http://h:1", Some("secret-key".into())));
        let out = format!("{binding:?}");
        assert!(!out.contains("secret-key"));
        assert!(out.contains("[redacted]"));
    }
}
