//! Relational storage layer
//!
//! One `ForumDatabase` per process wrapping the shared connection pool.
//! Operations are grouped per concern in sibling files; every mutating
//! operation on owned content runs LOAD, AUTHORIZE, and MUTATE inside a
//! single transaction.

mod answer_ops;
mod category_ops;
mod connection;
mod content_ops;
pub mod entities;
pub mod migration;
mod question_ops;
mod rating_ops;
mod user_ops;

#[cfg(test)]
mod tests;

pub use answer_ops::{AnswerPosted, NewAnswer};
pub use content_ops::{ContentKind, QuestionEdit};
pub use question_ops::{NewQuestion, QuestionPage};
pub use rating_ops::RatingSummary;
pub use user_ops::NewUser;

use sea_orm::DatabaseConnection;

/// Handle to the forum's relational store
#[derive(Clone)]
pub struct ForumDatabase {
    pub(super) db: DatabaseConnection,
}
