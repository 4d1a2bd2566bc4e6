//! HTTP tests for registration, signup, and login.

mod helpers;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_register_reseller_issues_one_time_password() {
    let app = TestApp::new();
    let data = app.register("reseller", "east-shop", Some(5)).await;

    assert_eq!(data["username"], "east-shop");
    assert_eq!(data["role"], "reseller");
    assert_eq!(data["message"], "Account created successfully");
    let password = data["password"].as_str().unwrap();
    assert_eq!(password.len(), 6);
    assert!(password.chars().all(|c| c.is_ascii_digit()));

    let token = app.login("east-shop", password).await;
    let quota = app.request("GET", "/api/reseller/quota", None, Some(&token)).await;
    assert_eq!(quota.status, StatusCode::OK);
    assert_eq!(quota.body["data"]["total_quota"], 5);
}

#[tokio::test]
async fn test_register_generates_username_when_absent() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "role": "admin", "email": "ops@example.com" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let username = response.body["data"]["username"].as_str().unwrap();
    assert_eq!(username.len(), 6);
    assert!(username.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_register_rejects_user_role() {
    let app = TestApp::new();
    for role in ["user", "superuser"] {
        let response = app
            .request(
                "POST",
                "/api/auth/register",
                Some(json!({ "role": role, "email": "x@example.com" })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "VALIDATION_ERROR");
    }
    assert!(app.store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_a_validation_error() {
    let app = TestApp::new();
    let response = app
        .raw_request("POST", "/api/auth/login", "{not json".to_string(), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_bad_password_and_unknown_user_look_the_same() {
    let app = TestApp::new();
    app.register("admin", "boss", None).await;

    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "boss", "password": "000000" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "nobody", "password": "000000" })),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body, unknown.body);
    assert_eq!(wrong.message(), "Invalid credentials");
}

#[tokio::test]
async fn test_login_returns_profile_without_hash() {
    let app = TestApp::new();
    let data = app.register("admin", "boss", None).await;
    let password = data["password"].as_str().unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "boss", "password": password })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let user = &response.body["data"]["user"];
    assert_eq!(user["username"], "boss");
    assert_eq!(user["role"], "admin");
    assert_eq!(user["status"], "active");
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_logs_in_immediately() {
    let app = TestApp::new();
    let before = Utc::now();

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "email": "new@example.com",
                "password": "hunter22",
                "package_id": 2,
                "full_name": "New Customer",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    let username = data["username"].as_str().unwrap();
    assert_eq!(
        data["message"],
        format!("Account created successfully! Your VPN username is: {username}")
    );
    assert_eq!(data["package"]["days"], 90);
    assert_eq!(data["user"]["role"], "user");
    assert_eq!(data["user"]["full_name"], "New Customer");

    let expires_at: DateTime<Utc> = data["user"]["expires_at"].as_str().unwrap().parse().unwrap();
    let offset = expires_at - before;
    assert!(offset >= Duration::days(90) && offset < Duration::days(90) + Duration::minutes(1));

    let token = data["token"].as_str().unwrap();
    let profile = app.request("GET", "/api/user/profile", None, Some(token)).await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["data"]["email"], "new@example.com");

    app.login(username, "hunter22").await;
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts_first() {
    let app = TestApp::new();
    app.signup("taken@example.com", "hunter22").await;

    // Missing password and package: the email check still wins.
    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({ "email": "taken@example.com" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "CONFLICT");
}

#[tokio::test]
async fn test_signup_requires_password_and_package() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({ "email": "a@example.com", "password": "hunter22" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.message(),
        "Email, password, and package selection are required"
    );
}

#[tokio::test]
async fn test_signup_unknown_package_creates_nothing() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "email": "a@example.com",
                "password": "hunter22",
                "package_id": 99,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Invalid package selected");
    assert!(app.store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_expired_user_cannot_log_in() {
    let app = TestApp::new();
    app.insert_user("lapsed", "hunter22", Utc::now() - Duration::hours(1))
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "lapsed", "password": "hunter22" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.message(), "User account has expired");
}

#[tokio::test]
async fn test_token_is_required() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/user/profile", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_code(), "UNAUTHORIZED");

    let garbage = app
        .request("GET", "/api/user/profile", None, Some("not-a-jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_catalog_and_health() {
    let app = TestApp::new();

    let packages = app.request("GET", "/api/packages", None, None).await;
    assert_eq!(packages.status, StatusCode::OK);
    let list = packages.body["data"].as_array().unwrap();
    assert_eq!(list.len(), 4);
    assert_eq!(list[3]["name"], "12 Months");
    assert_eq!(list[3]["days"], 365);

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["data"]["status"], "ok");
}
