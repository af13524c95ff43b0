//! Cryptographic helpers: password hashing and reset-token handling

pub mod password;
pub mod token;
