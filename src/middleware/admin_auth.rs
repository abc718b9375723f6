use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::db::{AppState, queries};
use crate::error::{AppError, Result, msg};
use crate::models::User;
use crate::util::extract_bearer_token;

/// The authenticated caller, inserted into request extensions.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
    /// Visible prefix of the key that authenticated the request
    pub key_prefix: String,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.user.is_admin
    }
}

/// Resolve the bearer credential to a user.
///
/// The pooled connection is released before this returns, so the handler
/// checks out its own.
fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthContext> {
    let token =
        extract_bearer_token(headers).ok_or_else(|| AppError::Unauthorized(msg::TOKEN_MISSING.into()))?;

    let conn = state.db.get()?;
    let (user, key) = queries::get_user_by_api_key(&conn, token)?
        .ok_or_else(|| AppError::Unauthorized(msg::TOKEN_INVALID.into()))?;

    Ok(AuthContext {
        user,
        key_prefix: key.key_prefix,
    })
}

/// Require any valid credential (401 otherwise).
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let ctx = authenticate(&state, request.headers())?;

    request.extensions_mut().insert(ctx);
    Ok(next.run(request).await)
}

/// Require a valid credential (401 otherwise) that belongs to an admin (403 otherwise).
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let ctx = authenticate(&state, request.headers())?;

    if !ctx.is_admin() {
        tracing::debug!("Non-admin {} denied", ctx.user.id);
        return Err(AppError::Forbidden(msg::NOT_ADMIN.into()));
    }

    request.extensions_mut().insert(ctx);
    Ok(next.run(request).await)
}
