mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn topic_crud_round_trip() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (token, user_id) = common::register_user(&client, &server.base_url, "topia", "secret1").await?;

    // Create
    let res = client
        .post(format!("{}/api/topics/user/{}", server.base_url, user_id))
        .bearer_auth(&token)
        .json(&json!({ "name": "home", "description": "around the house" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    let topic_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["user_id"], user_id);
    assert_eq!(body["data"]["name"], "home");

    // Get
    let res = client
        .get(format!("{}/api/topics/{}", server.base_url, topic_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Full-replace update drops the description when omitted
    let res = client
        .put(format!("{}/api/topics/{}", server.base_url, topic_id))
        .bearer_auth(&token)
        .json(&json!({ "name": "house" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["name"], "house");
    assert_eq!(body["data"]["description"], Value::Null);

    // Delete, then repeat delete reports deleted=false
    let res = client
        .delete(format!("{}/api/topics/{}", server.base_url, topic_id))
        .bearer_auth(&token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["deleted"], true);

    let res = client
        .delete(format!("{}/api/topics/{}", server.base_url, topic_id))
        .bearer_auth(&token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["deleted"], false);
    Ok(())
}

#[tokio::test]
async fn topics_list_newest_first() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (token, user_id) = common::register_user(&client, &server.base_url, "lister", "secret1").await?;

    let mut created = Vec::new();
    for name in ["first", "second", "third"] {
        let res = client
            .post(format!("{}/api/topics/user/{}", server.base_url, user_id))
            .bearer_auth(&token)
            .json(&json!({ "name": name }))
            .send()
            .await?;
        let body: Value = res.json().await?;
        created.push(body["data"]["id"].as_i64().unwrap());
    }

    let res = client
        .get(format!("{}/api/topics/user/{}", server.base_url, user_id))
        .bearer_auth(&token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    let listed: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();

    created.reverse();
    assert_eq!(listed, created);
    Ok(())
}

#[tokio::test]
async fn topic_create_checks_owner_and_name() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (token, user_id) = common::register_user(&client, &server.base_url, "checker", "secret1").await?;

    // Unknown owner
    let res = client
        .post(format!("{}/api/topics/user/999999", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "orphan" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["error_code"], "USER_001");

    // Blank name
    let res = client
        .post(format!("{}/api/topics/user/{}", server.base_url, user_id))
        .bearer_auth(&token)
        .json(&json!({ "name": "   " }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error_code"], "TOPIC_003");

    // No identity bound at all
    let res = client
        .post(format!("{}/api/topics/user/{}", server.base_url, user_id))
        .json(&json!({ "name": "nope" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
