//! Authentication primitives

pub mod jwt;

pub use jwt::{Claims, JwtHandler};
