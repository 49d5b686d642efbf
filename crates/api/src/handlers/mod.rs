//! Request handlers, one module per resource.
//!
//! Handlers validate input, delegate to the repositories in `formulaw_db`,
//! and map errors via [`crate::error::AppError`]. Request/response DTOs live
//! beside the handlers that use them.

pub mod admin;
pub mod advocate;
pub mod auth;
pub mod client;
pub mod utils;
pub mod webhooks;
