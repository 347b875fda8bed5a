//! HTTP API integration tests.
//!
//! Tests for REST API endpoints (health check, relay stats).

mod fixtures;
use fixtures::{TestClient, TestServer};

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_stats_endpoint_reflects_relay_state() {
    // テスト項目: /api/stats が接続数と履歴件数を返す
    // given (前提条件):
    let server = TestServer::start_with_history_capacity(10).await;
    let (mut alice, _) = TestClient::connect(&server).await;
    alice.send_chat("alice", "hello").await;
    alice.expect_event("chat:message").await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/stats", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["connected"], 1);
    assert_eq!(body["history_len"], 1);
    assert_eq!(body["history_capacity"], 10);
}

#[tokio::test]
async fn test_stats_endpoint_on_fresh_relay() {
    // テスト項目: 起動直後は接続数 0・履歴 0 件
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let body: serde_json::Value = reqwest::get(format!("{}/api/stats", server.base_url()))
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");

    // then (期待する結果):
    assert_eq!(body["connected"], 0);
    assert_eq!(body["history_len"], 0);
    assert_eq!(body["history_capacity"], 100);
}
