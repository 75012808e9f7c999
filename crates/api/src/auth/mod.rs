//! Authentication primitives.
//!
//! Tokens are issued by the external auth service; this crate only
//! validates them.
//!
//! - [`jwt`] -- JWT access-token validation (and issuance for tests/tooling).

pub mod jwt;
