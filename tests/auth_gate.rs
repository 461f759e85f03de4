//! tests/auth_gate.rs
//! Every todo and hello operation without a credential must yield 401
//! before any store access happens. These tests run without Postgres or
//! Redis: the gate rejects a missing Authorization header up front.

#[path = "mod.rs"]
mod common;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
async fn list_todos_without_credential_is_unauthorized() {
    let base_url: String = common::spawn_app();

    let resp: reqwest::Response = Client::new()
        .get(format!("{}/todos", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn create_todo_without_credential_is_unauthorized() {
    let base_url: String = common::spawn_app();

    // A valid payload must make no difference; the gate runs first
    let resp: reqwest::Response = Client::new()
        .post(format!("{}/todos", base_url))
        .json(&json!({ "title": "buy milk" }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn retrieve_update_delete_without_credential_are_unauthorized() {
    let base_url: String = common::spawn_app();
    let client: Client = Client::new();
    let item_url: String = format!("{}/todos/00000000-0000-0000-0000-000000000000", base_url);

    let get_resp = client.get(&item_url).send().await.unwrap();
    assert_eq!(get_resp.status(), StatusCode::UNAUTHORIZED);

    let put_resp = client
        .put(&item_url)
        .json(&json!({ "title": "changed" }))
        .send()
        .await
        .unwrap();
    assert_eq!(put_resp.status(), StatusCode::UNAUTHORIZED);

    let patch_resp = client
        .patch(&item_url)
        .json(&json!({ "completed": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(patch_resp.status(), StatusCode::UNAUTHORIZED);

    let delete_resp = client.delete(&item_url).send().await.unwrap();
    assert_eq!(delete_resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn hello_without_credential_is_unauthorized() {
    let base_url: String = common::spawn_app();

    let resp: reqwest::Response = Client::new()
        .get(format!("{}/hello", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let base_url: String = common::spawn_app();

    let resp: reqwest::Response = Client::new()
        .get(format!("{}/hello", base_url))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
