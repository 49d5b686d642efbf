//! Authentication primitives.
//!
//! - [`token`] -- opaque bearer-token generation and hashing.

pub mod token;
