//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token validation for single-sign-on tokens.

pub mod jwt;
