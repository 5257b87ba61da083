//! Authentication primitives for staff sessions.
//!
//! - [`password`]: Argon2id password hashing and verification.
//! - [`jwt`]: access-token generation and validation.

pub mod jwt;
pub mod password;
