//! Shared utilities: errors, validation, and crypto helpers

pub mod crypto;
pub mod error;
pub mod validation;
