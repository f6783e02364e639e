//! HTTP API integration tests.
//!
//! Tests for REST API endpoints (health check, room creation, join, broadcast).

mod fixtures;
use fixtures::TestServer;

async fn put_room(client: &reqwest::Client, server: &TestServer, name: &str) -> reqwest::Response {
    client
        .put(format!("{}/api/rooms/{}", server.base_url(), name))
        .send()
        .await
        .expect("Failed to send request")
}

async fn post_json(
    client: &reqwest::Client,
    url: String,
    body: serde_json::Value,
) -> reqwest::Response {
    client
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request")
}

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
async fn test_put_room_is_idempotent() {
    // テスト項目: PUT /api/rooms/{name} は同じルームを返し続ける
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let first = put_room(&client, &server, "lobby").await;
    let second = put_room(&client, &server, "lobby").await;

    // then (期待する結果):
    assert_eq!(first.status(), 200);
    assert_eq!(second.status(), 200);
    let first: serde_json::Value = first.json().await.expect("Failed to parse JSON");
    let second: serde_json::Value = second.json().await.expect("Failed to parse JSON");
    assert_eq!(first["name"], "lobby");
    assert!(first["created_at"].is_string());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_join_returns_token() {
    // テスト項目: POST /api/rooms/{name}/clients は 201 と配信トークンを返す
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = post_json(
        &client,
        format!("{}/api/rooms/lobby/clients", server.base_url()),
        serde_json::json!({"client_id": "alice"}),
    )
    .await;

    // then (期待する結果):
    assert_eq!(response.status(), 201);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["room"], "lobby");
    assert_eq!(body["client_id"], "alice");
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_broadcast_reaches_joined_members() {
    // テスト項目: 参加済みメンバー全員への配信結果が返される
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    for id in ["bob", "alice"] {
        let joined = post_json(
            &client,
            format!("{}/api/rooms/lobby/clients", server.base_url()),
            serde_json::json!({"client_id": id}),
        )
        .await;
        assert_eq!(joined.status(), 201);
    }

    // when (操作):
    let response = post_json(
        &client,
        format!("{}/api/rooms/lobby/messages", server.base_url()),
        serde_json::json!({"content": "hello"}),
    )
    .await;

    // then (期待する結果): 配信先はクライアント ID 順に並ぶ
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["attempted"], 2);
    assert_eq!(body["delivered"], serde_json::json!(["alice", "bob"]));
    assert_eq!(body["failed"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_broadcast_to_empty_room() {
    // テスト項目: メンバーのいないルームへのブロードキャストは 0 件の試行で成功する
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = post_json(
        &client,
        format!("{}/api/rooms/quiet/messages", server.base_url()),
        serde_json::json!({"content": "anyone?"}),
    )
    .await;

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["attempted"], 0);
}

#[tokio::test]
async fn test_join_with_empty_client_id_is_rejected() {
    // テスト項目: 空のクライアント ID での参加は 400 を返す
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = post_json(
        &client,
        format!("{}/api/rooms/lobby/clients", server.base_url()),
        serde_json::json!({"client_id": ""}),
    )
    .await;

    // then (期待する結果):
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_empty_message_is_broadcast() {
    // テスト項目: 空のメッセージもブロードキャストでき、200 を返す
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = post_json(
        &client,
        format!("{}/api/rooms/lobby/messages", server.base_url()),
        serde_json::json!({"content": ""}),
    )
    .await;

    // then (期待する結果):
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_oversized_message_is_rejected() {
    // テスト項目: 10000 バイトを超えるメッセージのブロードキャストは 400 を返す
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = post_json(
        &client,
        format!("{}/api/rooms/lobby/messages", server.base_url()),
        serde_json::json!({"content": "a".repeat(10001)}),
    )
    .await;

    // then (期待する結果):
    assert_eq!(response.status(), 400);
}
