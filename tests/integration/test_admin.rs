use super::helpers::{
    admin_token, create_post, empty_request, expect_status, json_request, read_json, send,
    spawn_app,
};
use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn admin_routes_require_an_admin_token() {
    let app = spawn_app().await;

    expect_status(
        send(&app.app, empty_request("GET", "/api/v1/admin/dashboard", None, None)).await,
        StatusCode::UNAUTHORIZED,
    )
    .await;

    let req = json_request(
        "POST",
        "/api/v1/admin/login",
        json!({ "email": app.admin_email, "password": "wrong-password" }),
        None,
        None,
    );
    expect_status(send(&app.app, req).await, StatusCode::UNAUTHORIZED).await;

    let req = json_request(
        "POST",
        "/api/v1/auth/register",
        json!({ "username": "sneaky", "email": "sneaky@example.com", "password": "StrongPass123!" }),
        None,
        None,
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    let user_token = body["token"].as_str().expect("user token");

    expect_status(
        send(
            &app.app,
            empty_request("GET", "/api/v1/admin/dashboard", Some(user_token), None),
        )
        .await,
        StatusCode::FORBIDDEN,
    )
    .await;
}

#[tokio::test]
async fn dashboard_reports_counts() {
    let app = spawn_app().await;
    let admin = admin_token(&app).await;
    create_post(&app, &admin, "First").await;
    create_post(&app, &admin, "Second").await;

    let res = expect_status(
        send(&app.app, empty_request("GET", "/api/v1/admin/dashboard", Some(admin.as_str()), None)).await,
        StatusCode::OK,
    )
    .await;
    let summary: Value = read_json(res).await;
    assert_eq!(summary["post_count"], 2);
    assert_eq!(summary["recent_posts"].as_array().map(Vec::len), Some(2));
    assert_eq!(summary["flagged_review_count"], 0);
    assert_eq!(summary["blocked_ip_count"], 0);
}

#[tokio::test]
async fn posts_are_numbered_and_sorted() {
    let app = spawn_app().await;
    let admin = admin_token(&app).await;
    create_post(&app, &admin, "One").await;
    create_post(&app, &admin, "Two").await;

    let res = expect_status(
        send(&app.app, empty_request("GET", "/api/v1/posts?sort=newest", None, None)).await,
        StatusCode::OK,
    )
    .await;
    let posts: Value = read_json(res).await;
    assert_eq!(posts[0]["title"], "Two");
    assert_eq!(posts[0]["num"], 2);
    assert_eq!(posts[1]["num"], 1);

    let res = expect_status(
        send(&app.app, empty_request("GET", "/api/v1/posts", None, None)).await,
        StatusCode::OK,
    )
    .await;
    let posts: Value = read_json(res).await;
    assert_eq!(posts[0]["title"], "One");
}

#[tokio::test]
async fn deleting_a_post_takes_its_reviews_with_it() {
    let app = spawn_app().await;
    let admin = admin_token(&app).await;
    let post_id = create_post(&app, &admin, "Short lived").await;

    let req = json_request(
        "POST",
        &format!("/api/v1/posts/{}/reviews", post_id),
        json!({ "body": "Nice route choice through the valley." }),
        None,
        Some("198.51.100.60"),
    );
    expect_status(send(&app.app, req).await, StatusCode::CREATED).await;
    assert_eq!(app.store.review_count(), 1);

    expect_status(
        send(
            &app.app,
            empty_request("DELETE", &format!("/api/v1/admin/posts/{}", post_id), Some(admin.as_str()), None),
        )
        .await,
        StatusCode::NO_CONTENT,
    )
    .await;
    assert_eq!(app.store.review_count(), 0);
    expect_status(
        send(&app.app, empty_request("GET", &format!("/api/v1/posts/{}", post_id), None, None)).await,
        StatusCode::NOT_FOUND,
    )
    .await;
}

#[tokio::test]
async fn manual_block_is_idempotent_and_reversible() {
    let app = spawn_app().await;
    let admin = admin_token(&app).await;
    let ip = "192.0.2.77";

    let block = || {
        json_request(
            "POST",
            "/api/v1/admin/blocked-ips",
            json!({ "ip": ip, "reason": "manual" }),
            Some(admin.as_str()),
            None,
        )
    };
    let res = expect_status(send(&app.app, block()).await, StatusCode::CREATED).await;
    let first: Value = read_json(res).await;
    assert_eq!(first["newly_blocked"], true);
    let res = expect_status(send(&app.app, block()).await, StatusCode::OK).await;
    let second: Value = read_json(res).await;
    assert_eq!(second["newly_blocked"], false);

    expect_status(
        send(&app.app, empty_request("GET", "/api/v1/posts", None, Some(ip))).await,
        StatusCode::FORBIDDEN,
    )
    .await;

    let unblock = || {
        empty_request(
            "DELETE",
            &format!("/api/v1/admin/blocked-ips/{}", ip),
            Some(admin.as_str()),
            None,
        )
    };
    expect_status(send(&app.app, unblock()).await, StatusCode::NO_CONTENT).await;
    // removing an address that is not blocked is fine
    expect_status(send(&app.app, unblock()).await, StatusCode::NO_CONTENT).await;

    expect_status(
        send(&app.app, empty_request("GET", "/api/v1/posts", None, Some(ip))).await,
        StatusCode::OK,
    )
    .await;

    let req = json_request(
        "POST",
        "/api/v1/admin/blocked-ips",
        json!({ "ip": "not-an-ip" }),
        Some(admin.as_str()),
        None,
    );
    expect_status(send(&app.app, req).await, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn moderation_preview_scores_without_saving() {
    let app = spawn_app().await;
    let admin = admin_token(&app).await;

    let req = json_request(
        "POST",
        "/api/v1/admin/moderation/preview",
        json!({ "body": "aaaaaaaaa" }),
        Some(admin.as_str()),
        None,
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    let preview: Value = read_json(res).await;
    assert_eq!(preview["result"]["score"], 3);
    assert_eq!(preview["result"]["disposition"], "FLAG");
    assert_eq!(preview["result"]["reasons"][0], "repetitive: 1 matches");
    assert!(preview["spam_message"].is_string());
    assert_eq!(app.store.review_count(), 0);
}

#[tokio::test]
async fn handled_requests_are_tracked() {
    let app = spawn_app().await;
    send(&app.app, empty_request("GET", "/api/v1/posts", None, None)).await;
    send(&app.app, empty_request("GET", "/static/site.css", None, None)).await;
    assert_eq!(app.store.visit_count(), 1);
}
