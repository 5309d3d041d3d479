// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `agentkit demo`: a scripted walkthrough of every dispatch path.

use agentkit_config::AgentKitConfig;
use agentkit_core::{params, KitError};
use agentkit_dispatch::AgentKit;
use serde_json::{json, Value};

use crate::kit::{build_kit, OFFCHAIN, ONCHAIN};

/// Runs the walkthrough and returns `(step, result)` pairs in order.
///
/// The endpoint is started on a free port and stopped before returning,
/// including when a step fails.
pub async fn run_demo(config: &AgentKitConfig) -> Result<Vec<(String, Value)>, KitError> {
    let kit = build_kit(config)?;
    let mut steps = Vec::new();

    let mut step = |name: &str, value: Value| steps.push((name.to_string(), value));

    step(
        "init a1",
        kit.perform(ONCHAIN, "init", params(json!({"address": "a1", "balances": {"ETH": 100}})))
            .await?,
    );
    step(
        "transfer a1 -> a2",
        kit.perform(
            ONCHAIN,
            "transfer",
            params(json!({"from": "a1", "to": "a2", "amount": 30, "token": "ETH"})),
        )
        .await?,
    );
    step(
        "swap a2 ETH -> USDC",
        kit.perform(
            ONCHAIN,
            "swap",
            params(json!({"address": "a2", "from_token": "ETH", "to_token": "USDC", "amount": 10})),
        )
        .await?,
    );
    step(
        "balances a2",
        kit.perform(ONCHAIN, "balance_of", params(json!({"address": "a2"})))
            .await?,
    );
    step(
        "send_transaction",
        kit.perform(ONCHAIN, "send_transaction", params(json!({"tx": {"to": "a2", "value": 1}})))
            .await?,
    );
    step(
        "chain info",
        kit.perform(ONCHAIN, "get_chain_info", params(json!({}))).await?,
    );
    step(
        "hello",
        kit.perform(OFFCHAIN, "hello", params(json!({"name": "AgentKit"})))
            .await?,
    );

    kit.register_local_tool("local_hello", |provider, action, params| {
        Ok(json!({"via": "local", "provider": provider, "action": action, "params": params}))
    });
    step(
        "local tool",
        kit.perform_tool("local_hello", OFFCHAIN, "hello", params(json!({"name": "local"})))
            .await?,
    );

    let remote = remote_steps(&kit).await;
    kit.stop_remote_endpoint().await;
    steps.extend(remote?);

    let info = serde_json::to_value(kit.info())
        .map_err(|e| KitError::Internal(format!("failed to encode info: {e}")))?;
    steps.push(("info".to_string(), info));
    Ok(steps)
}

async fn remote_steps(kit: &AgentKit) -> Result<Vec<(String, Value)>, KitError> {
    let base_url = kit.start_remote_endpoint("127.0.0.1", None, None).await?;
    kit.register_remote_tool("mcp_tool", &base_url, None);

    let via_tool = kit
        .perform_tool(
            "mcp_tool",
            OFFCHAIN,
            "hello",
            params(json!({"name": "AgentKit via endpoint"})),
        )
        .await?;
    let via_mcp = kit
        .perform_tool("mcp", OFFCHAIN, "echo", params(json!({"message": "hi"})))
        .await?;

    Ok(vec![
        ("endpoint".to_string(), json!(base_url)),
        ("remote tool".to_string(), via_tool),
        ("mcp tool".to_string(), via_mcp),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(steps: &'a [(String, Value)], name: &str) -> &'a Value {
        &steps
            .iter()
            .find(|(s, _)| s == name)
            .unwrap_or_else(|| panic!("missing step {name}"))
            .1
    }

    #[tokio::test]
    async fn demo_walks_every_path() {
        let steps = run_demo(&AgentKitConfig::default()).await.unwrap();

        assert_eq!(find(&steps, "init a1")["balances"]["ETH"], json!(100.0));
        assert_eq!(find(&steps, "transfer a1 -> a2")["status"], "ok");
        let a2 = &find(&steps, "balances a2")["balances"];
        assert_eq!(a2["ETH"], json!(20.0));
        assert_eq!(a2["USDC"], json!(10.0));
        assert_eq!(
            find(&steps, "hello"),
            &json!({"greeting": "hello AgentKit"})
        );
        assert_eq!(find(&steps, "local tool")["via"], "local");
        assert_eq!(
            find(&steps, "remote tool"),
            &json!({"ok": true, "result": {"greeting": "hello AgentKit via endpoint"}})
        );
        assert_eq!(find(&steps, "mcp tool")["result"]["echo"], "hi");
        assert_eq!(
            find(&steps, "info")["providers"],
            json!([OFFCHAIN, ONCHAIN])
        );
    }
}
