// Handlers module
// HTTP handlers for the pet directory

pub mod pets;

use axum::{http::StatusCode, response::{Html, IntoResponse}};

use crate::views;

/// Landing page
/// GET /
pub async fn index() -> impl IntoResponse {
    (StatusCode::OK, Html(views::welcome()))
}

/// Health check handler
/// Returns "OK" with 200 status for monitoring purposes
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
