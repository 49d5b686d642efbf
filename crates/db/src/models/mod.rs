//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and patches
//! - A `Serialize` response struct where the API shape differs from the row

pub mod advocate;
pub mod analytics;
pub mod call;
pub mod otp;
pub mod session;
pub mod user;
pub mod wallet;
