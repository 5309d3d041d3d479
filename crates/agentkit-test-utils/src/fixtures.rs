// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handler and tool fixtures shared by integration tests.

use std::sync::{Arc, Mutex, PoisonError};

use agentkit_core::{BoxError, KitError, Params, PerformRequest};
use serde_json::{json, Value};

/// `{"echo": params.message}`.
pub fn echo(p: Params) -> Result<Value, BoxError> {
    Ok(json!({"echo": p.get("message").cloned().unwrap_or(Value::Null)}))
}

/// Integer sum of `a` and `b`.
pub fn sum(p: Params) -> Result<Value, BoxError> {
    let a = p.get("a").and_then(Value::as_i64).ok_or("sum: `a` must be an integer")?;
    let b = p.get("b").and_then(Value::as_i64).ok_or("sum: `b` must be an integer")?;
    Ok(json!(a + b))
}

/// Always fails with the message in `reason`.
pub fn fail(p: Params) -> Result<Value, BoxError> {
    let reason = p
        .get("reason")
        .and_then(Value::as_str)
        .unwrap_or("handler failed");
    Err(reason.into())
}

/// A local tool that records each call and answers `{"recorded": n}`.
#[derive(Clone, Default)]
pub struct RecordingTool {
    calls: Arc<Mutex<Vec<PerformRequest>>>,
}

impl RecordingTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls seen so far, oldest first.
    pub fn calls(&self) -> Vec<PerformRequest> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The tool function, suitable for `AgentKit::register_local_tool`.
    pub fn function(
        &self,
    ) -> impl Fn(&str, &str, Params) -> Result<Value, KitError> + Send + Sync + 'static {
        let calls = Arc::clone(&self.calls);
        move |provider: &str, action: &str, params: Params| {
            let mut calls = calls.lock().unwrap_or_else(PoisonError::into_inner);
            calls.push(PerformRequest::new(provider, action, params));
            Ok(json!({"recorded": calls.len()}))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentkit_core::params;

    #[test]
    fn sum_adds_integers() {
        assert_eq!(sum(params(json!({"a": 2, "b": 3}))).unwrap(), json!(5));
        assert!(sum(params(json!({"a": "x"}))).is_err());
    }

    #[test]
    fn fail_uses_reason() {
        let err = fail(params(json!({"reason": "db down"}))).unwrap_err();
        assert_eq!(err.to_string(), "db down");
    }

    #[test]
    fn recording_tool_counts_calls() {
        let tool = RecordingTool::new();
        let f = tool.function();
        assert_eq!(f("p", "a", Params::new()).unwrap(), json!({"recorded": 1}));
        assert_eq!(f("q", "b", Params::new()).unwrap(), json!({"recorded": 2}));
        let calls = tool.calls();
        assert_eq!(calls[1].provider, "q");
        assert_eq!(calls[1].action, "b");
    }
}
