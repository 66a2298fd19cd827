//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access tokens and opaque-token hashing for refresh
//!   sessions and invitations.

pub mod jwt;
pub mod password;
