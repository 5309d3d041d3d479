// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests across the provider, dispatch, and endpoint crates.

use agentkit_core::KitError;
use agentkit_test_utils::{RecordingTool, TestHarness, OFFCHAIN, ONCHAIN};
use serde_json::{json, Value};

#[tokio::test]
async fn ledger_scenario() {
    let h = TestHarness::builder().build().await.unwrap();

    let r = h
        .perform(ONCHAIN, "init", json!({"address": "a1", "balances": {"ETH": 100}}))
        .await
        .unwrap();
    assert_eq!(r["balances"], json!({"ETH": 100.0}));

    let r = h
        .perform(
            ONCHAIN,
            "transfer",
            json!({"from": "a1", "to": "a2", "amount": 30, "token": "ETH"}),
        )
        .await
        .unwrap();
    assert_eq!(r["status"], "ok");
    assert_eq!(r["amount"], json!(30.0));
    assert_eq!(h.ledger().balances("a1").await["ETH"], 70.0);
    assert_eq!(h.ledger().balances("a2").await["ETH"], 30.0);

    h.perform(
        ONCHAIN,
        "swap",
        json!({"address": "a2", "from_token": "ETH", "to_token": "USDC", "amount": 10}),
    )
    .await
    .unwrap();
    let a2 = h.ledger().balances("a2").await;
    assert_eq!(a2["ETH"], 20.0);
    assert_eq!(a2["USDC"], 10.0);
}

#[tokio::test]
async fn overdraft_over_http_is_a_conflict_and_changes_nothing() {
    let h = TestHarness::builder().with_endpoint().build().await.unwrap();
    h.perform(ONCHAIN, "init", json!({"address": "a1", "balances": {"ETH": 5}}))
        .await
        .unwrap();

    let err = h
        .perform_tool(
            "mcp",
            ONCHAIN,
            "transfer",
            json!({"from": "a1", "to": "a2", "amount": 6}),
        )
        .await
        .unwrap_err();
    match err {
        KitError::RemoteTool { status, body } => {
            assert_eq!(status, Some(409));
            let detail: Value = serde_json::from_str(&body).unwrap();
            assert!(detail["detail"].as_str().unwrap().contains("insufficient"));
        }
        other => panic!("expected RemoteTool error, got {other:?}"),
    }
    assert_eq!(h.ledger().balances("a1").await["ETH"], 5.0);
    let a2 = h.ledger().balances("a2").await;
    assert_eq!(a2.get("ETH").copied().unwrap_or(0.0), 0.0);
    h.shutdown().await;
}

#[tokio::test]
async fn remote_echo_scenario() {
    let h = TestHarness::builder().with_endpoint().build().await.unwrap();
    let r = h
        .perform_tool("mcp", OFFCHAIN, "echo", json!({"message": "hi"}))
        .await
        .unwrap();
    assert_eq!(r, json!({"ok": true, "result": {"echo": "hi"}}));
    h.shutdown().await;
}

#[tokio::test]
async fn info_endpoint_lists_providers_without_secret() {
    let h = TestHarness::builder()
        .with_connection("k1", "s1-very-secret", Some("https://rpc.example"))
        .with_credential("api")
        .build()
        .await
        .unwrap();
    let base = h.base_url().unwrap().to_string();

    let body = reqwest::get(format!("{base}/mcp/info"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!body.contains("s1-very-secret"));
    let info: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(info["providers"], json!([OFFCHAIN, ONCHAIN]));
    assert_eq!(info["connection"]["key_name"], "k1");
    assert_eq!(info["connection"]["endpoint"], "https://rpc.example");
    h.shutdown().await;
}

#[tokio::test]
async fn credential_rejects_before_dispatch() {
    let h = TestHarness::builder().with_credential("api").build().await.unwrap();
    let base = h.base_url().unwrap().to_string();

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/mcp/perform"))
        .json(&json!({"provider": ONCHAIN, "action": "init", "params": {"address": "x", "balances": {"ETH": 1}}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 401);
    assert!(h.ledger().balances("x").await.is_empty());

    let r = h
        .perform_tool("mcp", OFFCHAIN, "sum", json!({"a": 2, "b": 5}))
        .await
        .unwrap();
    assert_eq!(r["result"], json!(7));
    h.shutdown().await;
}

#[tokio::test]
async fn handler_failure_surfaces_over_http() {
    let h = TestHarness::builder().with_endpoint().build().await.unwrap();
    let err = h
        .perform_tool("mcp", OFFCHAIN, "fail", json!({"reason": "db down"}))
        .await
        .unwrap_err();
    match err {
        KitError::RemoteTool { status, body } => {
            assert_eq!(status, Some(500));
            assert!(body.contains("db down"));
        }
        other => panic!("expected RemoteTool error, got {other:?}"),
    }
    h.shutdown().await;
}

#[tokio::test]
async fn signed_transaction_with_real_key_verifies() {
    let secret = "11".repeat(32);
    let h = TestHarness::builder()
        .with_connection("k1", &secret, None)
        .build()
        .await
        .unwrap();
    let r = h
        .perform(ONCHAIN, "send_transaction", json!({"tx": {"to": "a2", "value": 1}}))
        .await
        .unwrap();
    assert_eq!(r["simulated_signature"], json!(false));

    let raw = serde_json::to_vec(&json!({"to": "a2", "value": 1})).unwrap();
    let sig = r["signature"].as_str().unwrap();
    assert!(h.kit().connection().verify(&raw, sig));
}

#[tokio::test]
async fn local_tool_sees_the_triple_and_rebinding_wins() {
    let h = TestHarness::builder().build().await.unwrap();
    let first = RecordingTool::new();
    let second = RecordingTool::new();
    h.kit().register_local_tool("rec", first.function());
    h.kit().register_local_tool("rec", second.function());

    h.perform_tool("rec", ONCHAIN, "init", json!({"address": "z"}))
        .await
        .unwrap();
    assert!(first.calls().is_empty());
    let calls = second.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].provider, ONCHAIN);
    assert_eq!(calls[0].params["address"], "z");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_remote_drains_never_overspend() {
    let h = TestHarness::builder().with_endpoint().build().await.unwrap();
    h.perform(ONCHAIN, "init", json!({"address": "a", "balances": {"ETH": 100}}))
        .await
        .unwrap();

    let mut tasks = Vec::new();
    for i in 0..12 {
        let kit = h.kit().clone();
        tasks.push(tokio::spawn(async move {
            kit.perform_tool(
                "mcp",
                ONCHAIN,
                "transfer",
                agentkit_core::params(json!({"from": "a", "to": format!("b{i}"), "amount": 25})),
            )
            .await
        }));
    }
    let mut ok = 0;
    for t in tasks {
        if t.await.unwrap().is_ok() {
            ok += 1;
        }
    }
    assert_eq!(ok, 4);
    assert_eq!(h.ledger().balances("a").await["ETH"], 0.0);
    h.shutdown().await;
}
