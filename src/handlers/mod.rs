mod products;
mod reviews;
mod upload;

pub use products::*;
pub use reviews::*;
pub use upload::*;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
};
use serde::Serialize;

use crate::db::AppState;
use crate::middleware::{require_admin, require_auth};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// All API routes. `max_upload_bytes` caps the multipart body on `/resource/upload`.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router<AppState> {
    // Admin-only resource routes
    let admin_routes = Router::new()
        .route("/resource/products", get(list_products).post(create_product))
        .route(
            "/resource/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route(
            "/resource/products/{id}/reviews/{review_id}",
            delete(delete_review),
        )
        .route(
            "/resource/upload",
            post(upload_asset).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Any authenticated user
    let member_routes = Router::new()
        .route("/resource/products/{id}/reviews", post(create_review))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/health", get(health))
        .merge(admin_routes)
        .merge(member_routes)
}
