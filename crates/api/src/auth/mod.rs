//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation and validation.
//! - [`yandex`] -- Yandex OAuth code exchange.

pub mod jwt;
pub mod password;
pub mod yandex;
