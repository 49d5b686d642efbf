//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the Bearer session token to its user.
//! - [`rbac::RequireClient`] -- Requires the `client` role.
//! - [`rbac::RequireAdvocate`] -- Requires the `advocate` role.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.

pub mod auth;
pub mod rbac;
