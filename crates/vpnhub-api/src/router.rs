//! Route definitions for the VPNHub HTTP API.
//!
//! All routes are organized by audience and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::Router;
use axum::routing::{delete, get, post, put};

use crate::handlers;
use crate::state::AppState;

/// Build the API router without the outer middleware layers.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(admin_routes())
        .merge(reseller_routes())
        .merge(public_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Registration, signup, and login. No token required.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
}

/// The caller's own account
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/profile", get(handlers::user::get_profile))
        .route("/user/update", put(handlers::user::update_profile))
        .route("/user/delete", delete(handlers::user::delete_account))
}

/// Account administration (admin only)
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(handlers::admin::list_users))
        .route("/admin/users/{id}", get(handlers::admin::get_user))
        .route("/admin/users/{id}/suspend", put(handlers::admin::suspend_user))
        .route("/admin/users/{id}/activate", put(handlers::admin::activate_user))
        .route("/admin/users/{id}/delete", delete(handlers::admin::delete_user))
}

/// End-user provisioning (reseller or admin)
fn reseller_routes() -> Router<AppState> {
    Router::new()
        .route("/reseller/create-user", post(handlers::reseller::create_user))
        .route("/reseller/users", get(handlers::reseller::list_users))
        .route("/reseller/quota", get(handlers::reseller::quota))
}

/// Package catalog and health
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/packages", get(handlers::package::list_packages))
        .route("/health", get(handlers::health::health))
}
