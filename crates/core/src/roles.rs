//! Well-known role name constants.
//!
//! Roles are stored as plain text on the `users` table; there is no lookup
//! table. A user row is identified by `(email, role)`, so the same email can
//! hold both a client and an advocate account.

pub const ROLE_CLIENT: &str = "client";
pub const ROLE_ADVOCATE: &str = "advocate";
pub const ROLE_ADMIN: &str = "admin";

/// All roles accepted by the OTP endpoints.
pub const VALID_ROLES: &[&str] = &[ROLE_CLIENT, ROLE_ADVOCATE, ROLE_ADMIN];

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}
