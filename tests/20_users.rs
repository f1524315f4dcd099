mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn user_crud_requires_authentication() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/api/users", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], "USER_003");

    let res = client.get(format!("{}/api/users/1", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn user_crud_round_trip() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (token, _admin_id) = common::register_user(&client, &server.base_url, "heidi", "secret1").await?;

    // Create another user through the plain CRUD route
    let res = client
        .post(format!("{}/api/users", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "username": "ivan", "password": "secret2" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    let ivan_id = body["data"]["id"].as_i64().unwrap();

    // List shows both accounts
    let res = client
        .get(format!("{}/api/users", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"heidi"));
    assert!(names.contains(&"ivan"));

    // Fetch by id
    let res = client
        .get(format!("{}/api/users/{}", server.base_url, ivan_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Full-replace update renames and changes the password
    let res = client
        .put(format!("{}/api/users/{}", server.base_url, ivan_id))
        .bearer_auth(&token)
        .json(&json!({ "username": "ivan2", "password": "secret3" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["username"], "ivan2");

    // New credentials work, old ones do not
    let res = client
        .post(format!("{}/api/users/login", server.base_url))
        .json(&json!({ "username": "ivan2", "password": "secret3" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let res = client
        .post(format!("{}/api/users/login", server.base_url))
        .json(&json!({ "username": "ivan2", "password": "secret2" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Renaming onto an existing username conflicts
    let res = client
        .put(format!("{}/api/users/{}", server.base_url, ivan_id))
        .bearer_auth(&token)
        .json(&json!({ "username": "heidi", "password": "secret3" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Delete; second delete reports deleted=false
    let res = client
        .delete(format!("{}/api/users/{}", server.base_url, ivan_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["deleted"], true);

    let res = client
        .delete(format!("{}/api/users/{}", server.base_url, ivan_id))
        .bearer_auth(&token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["deleted"], false);

    // Updating a missing user is a 404, not an upsert
    let res = client
        .put(format!("{}/api/users/{}", server.base_url, ivan_id))
        .bearer_auth(&token)
        .json(&json!({ "username": "ghost", "password": "secret9" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["error_code"], "USER_001");

    Ok(())
}

#[tokio::test]
async fn me_after_account_deletion_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (token, id) = common::register_user(&client, &server.base_url, "judy", "secret1").await?;

    let res = client
        .delete(format!("{}/api/users/{}", server.base_url, id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Token still verifies, but the subject is gone
    let res = client
        .get(format!("{}/api/users/me", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
