//! Session-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use formulaw_core::error::CoreError;
use formulaw_db::models::user::User;
use formulaw_db::repositories::SessionRepo;

use crate::auth::token::hash_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from an opaque Bearer token in the
/// `Authorization` header.
///
/// The token is hashed and resolved against the `sessions` table; revoked
/// and expired sessions do not authenticate. Use this as an extractor
/// parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user.id, role = %auth.user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The resolved user row for the session's owner.
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Not authenticated".into())))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Not authenticated".into())))?;

        let user = SessionRepo::find_active_user(&state.pool, &hash_token(token))
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid token".into())))?;

        Ok(AuthUser { user })
    }
}
