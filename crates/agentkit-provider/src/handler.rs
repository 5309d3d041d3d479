// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handler-registry action provider for off-chain work.
//!
//! Each action name maps to a plain closure. The provider adds nothing on
//! top: arguments go in as given, results come back verbatim, and a
//! handler's own error is surfaced as [`KitError::Handler`].

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use agentkit_core::{ActionProvider, BoxError, KitError, Params};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

/// A registered off-chain action.
pub type Handler = Arc<dyn Fn(Params) -> Result<Value, BoxError> + Send + Sync>;

/// Action provider that dispatches to registered handlers.
pub struct HandlerProvider {
    name: String,
    handlers: RwLock<HashMap<String, Handler>>,
}

impl HandlerProvider {
    /// Creates a provider with no handlers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Binds `handler` to `action`, replacing any existing binding.
    pub fn register<F>(&self, action: impl Into<String>, handler: F)
    where
        F: Fn(Params) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        let action = action.into();
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if handlers.insert(action.clone(), Arc::new(handler)).is_some() {
            warn!(provider = %self.name, action = %action, "replacing handler");
        } else {
            info!(provider = %self.name, action = %action, "registered handler");
        }
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_handler<F>(self, action: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Params) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.register(action, handler);
        self
    }

    /// Removes a handler. Returns whether one was bound.
    pub fn unregister(&self, action: &str) -> bool {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(action)
            .is_some()
    }

    fn handler(&self, action: &str) -> Option<Handler> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(action)
            .cloned()
    }
}

#[async_trait]
impl ActionProvider for HandlerProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn actions(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    async fn perform(&self, action: &str, params: Params) -> Result<Value, KitError> {
        debug!(provider = %self.name, action, "handler perform");
        let handler = self.handler(action).ok_or_else(|| KitError::UnknownAction {
            provider: self.name.clone(),
            action: action.to_string(),
        })?;

        handler(params).map_err(|source| KitError::Handler {
            provider: self.name.clone(),
            action: action.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentkit_core::params;
    use serde_json::json;
    use tracing_test::traced_test;

    fn sum(p: Params) -> Result<Value, BoxError> {
        let a = p.get("a").and_then(Value::as_i64).unwrap_or(0);
        let b = p.get("b").and_then(Value::as_i64).unwrap_or(0);
        Ok(json!(a + b))
    }

    #[tokio::test]
    async fn dispatches_to_registered_handler() {
        let off = HandlerProvider::new("off").with_handler("sum", sum);
        let r = off.perform("sum", params(json!({"a": 1, "b": 2}))).await.unwrap();
        assert_eq!(r, json!(3));
    }

    #[tokio::test]
    async fn result_is_returned_verbatim() {
        let off = HandlerProvider::new("off");
        off.register("echo", |p: Params| {
            Ok(json!({"echo": p.get("message").cloned().unwrap_or(Value::Null)}))
        });
        let r = off
            .perform("echo", params(json!({"message": "hello"})))
            .await
            .unwrap();
        assert_eq!(r, json!({"echo": "hello"}));
    }

    #[tokio::test]
    async fn unknown_action_is_an_error() {
        let off = HandlerProvider::new("off");
        let err = off.perform("nope", Params::new()).await.unwrap_err();
        assert!(matches!(err, KitError::UnknownAction { .. }));
    }

    #[tokio::test]
    async fn handler_failure_is_tagged() {
        let off = HandlerProvider::new("off");
        off.register("fail", |_| Err("database down".into()));
        let err = off.perform("fail", Params::new()).await.unwrap_err();
        match err {
            KitError::Handler {
                provider,
                action,
                source,
            } => {
                assert_eq!(provider, "off");
                assert_eq!(action, "fail");
                assert_eq!(source.to_string(), "database down");
            }
            other => panic!("expected Handler error, got {other:?}"),
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn replacing_a_handler_warns_and_takes_effect() {
        let off = HandlerProvider::new("off");
        off.register("v", |_| Ok(json!(1)));
        off.register("v", |_| Ok(json!(2)));
        assert!(logs_contain("replacing handler"));
        assert_eq!(off.perform("v", Params::new()).await.unwrap(), json!(2));
    }

    #[tokio::test]
    async fn unregister_and_actions() {
        let off = HandlerProvider::new("off")
            .with_handler("b", |_| Ok(Value::Null))
            .with_handler("a", |_| Ok(Value::Null));
        assert_eq!(off.actions(), vec!["a".to_string(), "b".to_string()]);
        assert!(off.unregister("a"));
        assert!(!off.unregister("a"));
        assert_eq!(off.actions(), vec!["b".to_string()]);
    }
}
