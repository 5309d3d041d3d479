// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-argument extraction for provider actions.

use agentkit_core::{KitError, Params};
use serde_json::Value;

/// Reads a required, non-empty string argument.
pub fn required_str(params: &Params, key: &str, action: &str) -> Result<String, KitError> {
    match params.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::String(_)) | Some(Value::Null) | None => Err(KitError::InvalidArgument(
            format!("{action} requires `{key}`"),
        )),
        Some(other) => Err(KitError::InvalidArgument(format!(
            "{action}: `{key}` must be a string, got {other}"
        ))),
    }
}

/// Reads an optional string argument, falling back to `default`.
pub fn str_or(params: &Params, key: &str, default: &str) -> String {
    params
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Reads a non-negative finite amount. Missing amounts are zero; numeric
/// strings are accepted.
pub fn amount(params: &Params, key: &str, action: &str) -> Result<f64, KitError> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(0.0),
        Some(value) => parse_amount(value)
            .ok_or_else(|| {
                KitError::InvalidArgument(format!(
                    "{action}: `{key}` must be a non-negative number, got {value}"
                ))
            }),
    }
}

/// Parses a JSON value as a non-negative finite amount.
pub fn parse_amount(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (n.is_finite() && n >= 0.0).then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentkit_core::params;
    use serde_json::json;

    #[test]
    fn required_str_rejects_missing_and_empty() {
        let p = params(json!({"from": "", "to": 5}));
        assert!(matches!(
            required_str(&p, "from", "transfer"),
            Err(KitError::InvalidArgument(_))
        ));
        assert!(matches!(
            required_str(&p, "to", "transfer"),
            Err(KitError::InvalidArgument(_))
        ));
        assert!(matches!(
            required_str(&p, "missing", "transfer"),
            Err(KitError::InvalidArgument(_))
        ));
    }

    #[test]
    fn str_or_uses_default() {
        let p = params(json!({"token": "USDC"}));
        assert_eq!(str_or(&p, "token", "ETH"), "USDC");
        assert_eq!(str_or(&Params::new(), "token", "ETH"), "ETH");
    }

    #[test]
    fn amount_accepts_numbers_and_numeric_strings() {
        let p = params(json!({"a": 30, "b": "12.5", "c": 0.25}));
        assert_eq!(amount(&p, "a", "t").unwrap(), 30.0);
        assert_eq!(amount(&p, "b", "t").unwrap(), 12.5);
        assert_eq!(amount(&p, "c", "t").unwrap(), 0.25);
        assert_eq!(amount(&p, "missing", "t").unwrap(), 0.0);
    }

    #[test]
    fn amount_rejects_negative_and_garbage() {
        let p = params(json!({"neg": -1, "word": "lots", "obj": {}}));
        assert!(amount(&p, "neg", "t").is_err());
        assert!(amount(&p, "word", "t").is_err());
        assert!(amount(&p, "obj", "t").is_err());
    }
}
