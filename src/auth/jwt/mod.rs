//! Stateless session token service

mod handler;
#[cfg(test)]
mod tests;
mod types;

pub use types::{Claims, JwtHandler};
