//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! match. Use these in route handlers to enforce authorization at the type
//! level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use formulaw_core::error::CoreError;
use formulaw_core::roles::{ROLE_ADMIN, ROLE_ADVOCATE, ROLE_CLIENT};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

fn forbidden() -> AppError {
    AppError::Core(CoreError::Forbidden("Insufficient permissions".into()))
}

/// Requires the `client` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn client_only(RequireClient(auth): RequireClient) -> AppResult<Json<()>> {
///     // auth.user is guaranteed to be a client here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireClient(pub AuthUser);

impl FromRequestParts<AppState> for RequireClient {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        if auth.user.role != ROLE_CLIENT {
            return Err(forbidden());
        }
        Ok(RequireClient(auth))
    }
}

/// Requires the `advocate` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdvocate(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdvocate {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        if auth.user.role != ROLE_ADVOCATE {
            return Err(forbidden());
        }
        Ok(RequireAdvocate(auth))
    }
}

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        if auth.user.role != ROLE_ADMIN {
            return Err(forbidden());
        }
        Ok(RequireAdmin(auth))
    }
}
