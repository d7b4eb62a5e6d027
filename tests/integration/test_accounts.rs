use super::helpers::{
    TestApp, admin_token, create_post, empty_request, expect_status, json_request, read_json,
    send, spawn_app, unique_email,
};
use axum::http::StatusCode;
use serde_json::{Value, json};

const PASSWORD: &str = "StrongPass123!";

async fn register(app: &TestApp, username: &str, email: &str) -> String {
    let req = json_request(
        "POST",
        "/api/v1/auth/register",
        json!({ "username": username, "email": email, "password": PASSWORD }),
        None,
        None,
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    body["token"].as_str().expect("missing user token").to_string()
}

#[tokio::test]
async fn details_update_returns_new_token_and_mails_both_addresses() {
    let app = spawn_app().await;
    let old_email = unique_email("before");
    let new_email = unique_email("after");
    let token = register(&app, "renamer", &old_email).await;

    let req = json_request(
        "PUT",
        "/api/v1/auth/me",
        json!({ "username": "renamed", "email": new_email, "password": PASSWORD }),
        Some(token.as_str()),
        None,
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["user"]["username"], "renamed");
    assert_eq!(body["user"]["email"], new_email.as_str());
    let fresh = body["token"].as_str().expect("missing token").to_string();

    let res = expect_status(
        send(&app.app, empty_request("GET", "/api/v1/auth/me", Some(fresh.as_str()), None)).await,
        StatusCode::OK,
    )
    .await;
    let me: Value = read_json(res).await;
    assert_eq!(me["username"], "renamed");

    assert_eq!(app.notifier.wait_for(2).await.len(), 2);
    let mut recipients = app.notifier.recipients();
    recipients.sort();
    let mut expected = vec![Some(old_email), Some(new_email)];
    expected.sort();
    assert_eq!(recipients, expected);
}

#[tokio::test]
async fn details_update_refuses_taken_username_and_bad_password() {
    let app = spawn_app().await;
    register(&app, "first-rider", &unique_email("first")).await;
    let email = unique_email("second");
    let token = register(&app, "second-rider", &email).await;

    let req = json_request(
        "PUT",
        "/api/v1/auth/me",
        json!({ "username": "first-rider", "email": email, "password": PASSWORD }),
        Some(token.as_str()),
        None,
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::BAD_REQUEST).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], "Username already taken");

    let req = json_request(
        "PUT",
        "/api/v1/auth/me",
        json!({ "username": "second-rider", "email": email, "password": "not-my-password" }),
        Some(token.as_str()),
        None,
    );
    expect_status(send(&app.app, req).await, StatusCode::UNAUTHORIZED).await;
    assert!(app.notifier.settle().await.is_empty());
}

#[tokio::test]
async fn deleting_account_removes_its_reviews() {
    let app = spawn_app().await;
    let admin = admin_token(&app).await;
    let post_id = create_post(&app, &admin, "Goodbye").await;
    let email = unique_email("leaver");
    let token = register(&app, "leaver", &email).await;

    let req = json_request(
        "POST",
        &format!("/api/v1/posts/{}/reviews", post_id),
        json!({ "body": "Really enjoyed the write-up of the climb, thanks for sharing it." }),
        Some(token.as_str()),
        Some("198.51.100.70"),
    );
    expect_status(send(&app.app, req).await, StatusCode::CREATED).await;
    assert_eq!(app.store.visible_review_ids(post_id).len(), 1);

    let req = json_request(
        "DELETE",
        "/api/v1/auth/me",
        json!({ "password": "wrong-password" }),
        Some(token.as_str()),
        None,
    );
    expect_status(send(&app.app, req).await, StatusCode::UNAUTHORIZED).await;
    assert_eq!(app.store.review_count(), 1);

    let req = json_request(
        "DELETE",
        "/api/v1/auth/me",
        json!({ "password": PASSWORD }),
        Some(token.as_str()),
        None,
    );
    expect_status(send(&app.app, req).await, StatusCode::NO_CONTENT).await;
    assert_eq!(app.store.review_count(), 0);
    assert!(app.store.visible_review_ids(post_id).is_empty());

    assert_eq!(
        app.notifier.wait_for(1).await,
        vec!["[Blogim] Account deleted".to_string()]
    );
    assert_eq!(app.notifier.recipients(), vec![Some(email)]);

    expect_status(
        send(&app.app, empty_request("GET", "/api/v1/auth/me", Some(token.as_str()), None)).await,
        StatusCode::UNAUTHORIZED,
    )
    .await;
}
