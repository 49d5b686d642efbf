//! User entity model and DTOs.

use formulaw_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// A user is one principal identity: the same email may own both a
/// `client` row and an `advocate` row (distinct ids).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub name: Option<String>,
    pub city: Option<String>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// User representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub name: Option<String>,
    pub city: Option<String>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            name: user.name,
            city: user.city,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub role: String,
    pub name: Option<String>,
    pub city: Option<String>,
}

/// DTO for a client updating their own profile. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUserProfile {
    pub name: Option<String>,
    pub city: Option<String>,
}
