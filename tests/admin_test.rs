//! HTTP tests for account administration.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_admin_routes_reject_other_roles() {
    let app = TestApp::new();
    let (_, reseller) = app.staff_session("reseller", "shop", Some(3)).await;
    let (_, _, user) = app.signup("c@example.com", "hunter22").await;

    for token in [&reseller, &user] {
        let response = app.request("GET", "/api/admin/users", None, Some(token)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.message(), "Admin access required");
    }
}

#[tokio::test]
async fn test_list_users_newest_first() {
    let app = TestApp::new();
    let (admin_id, token) = app.staff_session("admin", "boss", None).await;
    let (shop_id, _) = app.staff_session("reseller", "shop", Some(3)).await;

    let response = app.request("GET", "/api/admin/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let ids: Vec<i64> = response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![shop_id, admin_id]);
}

#[tokio::test]
async fn test_get_user_by_id() {
    let app = TestApp::new();
    let (_, token) = app.staff_session("admin", "boss", None).await;
    let (shop_id, _) = app.staff_session("reseller", "shop", Some(3)).await;

    let found = app
        .request("GET", &format!("/api/admin/users/{shop_id}"), None, Some(&token))
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["data"]["username"], "shop");

    let missing = app.request("GET", "/api/admin/users/9999", None, Some(&token)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let invalid = app.request("GET", "/api/admin/users/abc", None, Some(&token)).await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.message(), "Invalid user ID");
}

#[tokio::test]
async fn test_suspend_blocks_login_until_activated() {
    let app = TestApp::new();
    let (_, token) = app.staff_session("admin", "boss", None).await;
    let (user_id, username, _) = app.signup("c@example.com", "hunter22").await;

    let suspended = app
        .request("PUT", &format!("/api/admin/users/{user_id}/suspend"), None, Some(&token))
        .await;
    assert_eq!(suspended.status, StatusCode::OK);
    assert_eq!(suspended.body["data"]["message"], "User suspended successfully");

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": username, "password": "hunter22" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::FORBIDDEN);
    assert_eq!(login.message(), "User account is suspended");

    let activated = app
        .request("PUT", &format!("/api/admin/users/{user_id}/activate"), None, Some(&token))
        .await;
    assert_eq!(activated.status, StatusCode::OK);
    assert_eq!(activated.body["data"]["message"], "User activated successfully");

    app.login(&username, "hunter22").await;
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new();
    let (_, token) = app.staff_session("admin", "boss", None).await;
    let (user_id, _, _) = app.signup("c@example.com", "hunter22").await;
    let path = format!("/api/admin/users/{user_id}/delete");

    let deleted = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["message"], "User deleted successfully");

    let again = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_cannot_suspend_or_delete_self() {
    let app = TestApp::new();
    let (admin_id, token) = app.staff_session("admin", "boss", None).await;

    let suspend = app
        .request("PUT", &format!("/api/admin/users/{admin_id}/suspend"), None, Some(&token))
        .await;
    assert_eq!(suspend.status, StatusCode::FORBIDDEN);

    let delete = app
        .request("DELETE", &format!("/api/admin/users/{admin_id}/delete"), None, Some(&token))
        .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_stale_tokens_are_trusted_by_default() {
    let app = TestApp::new();
    let (_, admin) = app.staff_session("admin", "boss", None).await;
    let (user_id, _, user_token) = app.signup("c@example.com", "hunter22").await;

    app.request("PUT", &format!("/api/admin/users/{user_id}/suspend"), None, Some(&admin))
        .await;

    let profile = app.request("GET", "/api/user/profile", None, Some(&user_token)).await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["data"]["status"], "suspended");
}

#[tokio::test]
async fn test_status_recheck_rejects_suspended_and_deleted_accounts() {
    let app = TestApp::with_status_recheck();
    let (_, admin) = app.staff_session("admin", "boss", None).await;
    let (first_id, _, first_token) = app.signup("a@example.com", "hunter22").await;
    let (second_id, _, second_token) = app.signup("b@example.com", "hunter22").await;

    app.request("PUT", &format!("/api/admin/users/{first_id}/suspend"), None, Some(&admin))
        .await;
    let suspended = app.request("GET", "/api/user/profile", None, Some(&first_token)).await;
    assert_eq!(suspended.status, StatusCode::FORBIDDEN);

    app.request("DELETE", &format!("/api/admin/users/{second_id}/delete"), None, Some(&admin))
        .await;
    let deleted = app.request("GET", "/api/user/profile", None, Some(&second_token)).await;
    assert_eq!(deleted.status, StatusCode::UNAUTHORIZED);
}
