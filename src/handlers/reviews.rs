use axum::extract::{Extension, State};
use serde::Deserialize;

use crate::db::{AppState, queries};
use crate::error::Result;
use crate::extractors::{Json, Path};
use crate::middleware::AuthContext;
use crate::models::{CreateReview, Product};

use super::products::check_product_id;

#[derive(Deserialize)]
pub struct ReviewPath {
    pub id: String,
    pub review_id: String,
}

/// Add or replace the caller's review. Open to any authenticated user.
pub async fn create_review(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(input): Json<CreateReview>,
) -> Result<Json<Product>> {
    check_product_id(&id)?;
    input.validate()?;

    let mut conn = state.db.get()?;
    let product = queries::upsert_review(&mut conn, &id, &ctx.user, &input)?;
    Ok(Json(product))
}

pub async fn delete_review(
    State(state): State<AppState>,
    Path(path): Path<ReviewPath>,
) -> Result<Json<Product>> {
    check_product_id(&path.id)?;

    let mut conn = state.db.get()?;
    let product = queries::delete_review(&mut conn, &path.id, &path.review_id)?;
    Ok(Json(product))
}
