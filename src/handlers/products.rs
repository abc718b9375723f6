use axum::{
    extract::{Extension, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::db::{AppState, queries};
use crate::error::{AppError, OrNotFound, Result, msg};
use crate::extractors::{Json, Path};
use crate::id::is_valid_prefixed_id;
use crate::middleware::AuthContext;
use crate::models::{Product, UpdateProduct};

#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub message: &'static str,
    pub product: Product,
}

/// Malformed ids can never match a row; answer 404 without a query.
pub(crate) fn check_product_id(id: &str) -> Result<()> {
    if is_valid_prefixed_id(id) && id.starts_with("sy_prod_") {
        Ok(())
    } else {
        Err(AppError::NotFound(msg::PRODUCT_NOT_FOUND.into()))
    }
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let conn = state.db.get()?;
    let products = queries::list_products(&conn)?;
    Ok(Json(products))
}

/// Insert a placeholder listing. The request body is ignored.
pub async fn create_product(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<CreateProductResponse>> {
    let conn = state.db.get()?;
    let product = queries::create_placeholder_product(&conn)?;

    tracing::info!(
        product_id = %product.id,
        user_id = %ctx.user.id,
        key_prefix = %ctx.key_prefix,
        "Product created"
    );

    Ok(Json(CreateProductResponse {
        message: msg::PRODUCT_CREATED,
        product,
    }))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    check_product_id(&id)?;

    let conn = state.db.get()?;
    let product = queries::get_product_by_id(&conn, &id)?.or_not_found(msg::PRODUCT_NOT_FOUND)?;
    Ok(Json(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProduct>,
) -> Result<StatusCode> {
    check_product_id(&id)?;
    input.validate()?;

    let conn = state.db.get()?;
    if !queries::update_product(&conn, &id, &input)? {
        return Err(AppError::NotFound(msg::PRODUCT_NOT_FOUND.into()));
    }

    tracing::info!(
        product_id = %id,
        user_id = %ctx.user.id,
        key_prefix = %ctx.key_prefix,
        "Product updated"
    );
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_product(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    check_product_id(&id)?;

    let conn = state.db.get()?;
    if !queries::delete_product(&conn, &id)? {
        return Err(AppError::NotFound(msg::PRODUCT_NOT_FOUND.into()));
    }

    tracing::info!(
        product_id = %id,
        user_id = %ctx.user.id,
        key_prefix = %ctx.key_prefix,
        "Product deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
