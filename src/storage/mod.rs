//! Storage layer

pub mod database;

pub use database::ForumDatabase;
