//! Domain logic for the FormuLAW consultation platform.
//!
//! This crate holds everything that does not touch the network or the
//! database: the error taxonomy, billing and rating arithmetic, the
//! advocate verification state machine, OTP policy, and the static
//! catalogs served by the utility endpoints.

pub mod billing;
pub mod calls;
pub mod catalog;
pub mod error;
pub mod fid;
pub mod otp;
pub mod roles;
pub mod types;
pub mod validation;
pub mod verification;
