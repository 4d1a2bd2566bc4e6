//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl lives next to `AppError` in `vpnhub-core`
//! (feature `axum`); this module re-exports the response body and status table.

pub use vpnhub_core::error::http::{ApiErrorResponse, INTERNAL_MESSAGE, status_for};
