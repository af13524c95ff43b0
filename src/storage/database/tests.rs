//! Storage layer integration tests against in-memory SQLite

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::utils::error::ForumError;

use super::{ForumDatabase, NewAnswer, NewQuestion, NewUser, QuestionEdit};

/// A single pooled connection is required here: every connection to
/// `sqlite::memory:` gets its own database, so a pool of more than one
/// would scatter state across invisible copies.
async fn test_db() -> ForumDatabase {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connect_timeout: 5,
        acquire_timeout: 5,
    };
    let db = ForumDatabase::connect(&config)
        .await
        .expect("in-memory database should connect");
    db.migrate().await.expect("migrations should apply");
    db
}

async fn seed_user(db: &ForumDatabase, username: &str) -> Uuid {
    let user = db
        .create_user(NewUser {
            username: username.to_string(),
            firstname: "Test".to_string(),
            lastname: "User".to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
        })
        .await
        .expect("user should be created");
    user.id
}

async fn seed_question(db: &ForumDatabase, user_id: Uuid, title: &str) -> Uuid {
    db.create_question(NewQuestion {
        user_id,
        title: title.to_string(),
        description: "A longer description of the problem".to_string(),
        tag: Some("testing".to_string()),
        category_id: None,
    })
    .await
    .expect("question should be created")
}

async fn seed_answer(db: &ForumDatabase, question_id: Uuid, user_id: Uuid) -> i32 {
    let posted = db
        .create_answer(NewAnswer {
            question_id,
            user_id,
            body: "Try turning it off and on again".to_string(),
        })
        .await
        .expect("answer should be created");
    posted.answer_id
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let db = test_db().await;
    seed_user(&db, "alice").await;

    let err = db
        .create_user(NewUser {
            username: "alice".to_string(),
            firstname: "Other".to_string(),
            lastname: "Person".to_string(),
            email: "other@example.com".to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ForumError::Conflict(_)));
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let db = test_db().await;
    seed_user(&db, "alice").await;

    let err = db
        .create_user(NewUser {
            username: "alice2".to_string(),
            firstname: "Other".to_string(),
            lastname: "Person".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ForumError::Conflict(_)));
}

#[tokio::test]
async fn test_answer_to_missing_question_is_not_found() {
    let db = test_db().await;
    let user = seed_user(&db, "alice").await;

    let err = db
        .create_answer(NewAnswer {
            question_id: Uuid::new_v4(),
            user_id: user,
            body: "answering the void".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ForumError::NotFound(_)));
}

#[tokio::test]
async fn test_answer_carries_question_owner_email() {
    let db = test_db().await;
    let asker = seed_user(&db, "asker").await;
    let answerer = seed_user(&db, "answerer").await;
    let question = seed_question(&db, asker, "How do I exit vim?").await;

    let posted = db
        .create_answer(NewAnswer {
            question_id: question,
            user_id: answerer,
            body: ":wq".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(posted.question_title, "How do I exit vim?");
    assert_eq!(posted.owner_email.as_deref(), Some("asker@example.com"));
}

#[tokio::test]
async fn test_non_owner_cannot_edit_question() {
    let db = test_db().await;
    let owner = seed_user(&db, "owner").await;
    let intruder = seed_user(&db, "intruder").await;
    let question = seed_question(&db, owner, "Original title").await;

    let err = db
        .edit_question(
            question,
            intruder,
            QuestionEdit {
                title: "Hijacked".to_string(),
                description: "changed".to_string(),
                tag: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ForumError::Forbidden(_)));

    // The row must be untouched after the rejected attempt.
    let (found, _) = db.find_question(question).await.unwrap().unwrap();
    assert_eq!(found.title, "Original title");
}

#[tokio::test]
async fn test_owner_can_edit_question() {
    let db = test_db().await;
    let owner = seed_user(&db, "owner").await;
    let question = seed_question(&db, owner, "Original title").await;

    db.edit_question(
        question,
        owner,
        QuestionEdit {
            title: "Revised title".to_string(),
            description: "Revised description".to_string(),
            tag: Some("revised".to_string()),
        },
    )
    .await
    .unwrap();

    let (found, _) = db.find_question(question).await.unwrap().unwrap();
    assert_eq!(found.title, "Revised title");
    assert_eq!(found.description, "Revised description");
    assert_eq!(found.tag.as_deref(), Some("revised"));
}

#[tokio::test]
async fn test_non_owner_cannot_delete_answer() {
    let db = test_db().await;
    let asker = seed_user(&db, "asker").await;
    let answerer = seed_user(&db, "answerer").await;
    let intruder = seed_user(&db, "intruder").await;
    let question = seed_question(&db, asker, "A question").await;
    let answer = seed_answer(&db, question, answerer).await;

    let err = db.delete_answer(answer, intruder).await.unwrap_err();
    assert!(matches!(err, ForumError::Forbidden(_)));

    let answers = db.list_answers(question).await.unwrap();
    assert_eq!(answers.len(), 1);
}

#[tokio::test]
async fn test_owner_can_edit_answer() {
    let db = test_db().await;
    let asker = seed_user(&db, "asker").await;
    let answerer = seed_user(&db, "answerer").await;
    let question = seed_question(&db, asker, "A question").await;
    let answer = seed_answer(&db, question, answerer).await;

    db.edit_answer(answer, answerer, "A better answer".to_string())
        .await
        .unwrap();

    let answers = db.list_answers(question).await.unwrap();
    assert_eq!(answers[0].0.body, "A better answer");
}

#[tokio::test]
async fn test_question_delete_removes_answers_and_ratings() {
    let db = test_db().await;
    let asker = seed_user(&db, "asker").await;
    let answerer = seed_user(&db, "answerer").await;
    let rater = seed_user(&db, "rater").await;
    let question = seed_question(&db, asker, "Doomed question").await;
    let answer = seed_answer(&db, question, answerer).await;
    db.submit_rating(answer, rater, 4.0).await.unwrap();

    db.delete_question(question, asker).await.unwrap();

    assert!(db.find_question(question).await.unwrap().is_none());
    assert!(db.list_answers(question).await.unwrap().is_empty());
    let err = db.rating_summary(answer).await.unwrap_err();
    assert!(matches!(err, ForumError::NotFound(_)));
}

#[tokio::test]
async fn test_missing_question_edit_is_not_found() {
    let db = test_db().await;
    let user = seed_user(&db, "alice").await;

    let err = db
        .edit_question(
            Uuid::new_v4(),
            user,
            QuestionEdit {
                title: "t".to_string(),
                description: "d".to_string(),
                tag: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ForumError::NotFound(_)));
}

#[tokio::test]
async fn test_own_answer_cannot_be_rated() {
    let db = test_db().await;
    let asker = seed_user(&db, "asker").await;
    let answerer = seed_user(&db, "answerer").await;
    let question = seed_question(&db, asker, "A question").await;
    let answer = seed_answer(&db, question, answerer).await;

    let err = db.submit_rating(answer, answerer, 5.0).await.unwrap_err();
    assert!(matches!(err, ForumError::Forbidden(_)));

    let summary = db.rating_summary(answer).await.unwrap();
    assert_eq!(summary.count, 0);
}

#[tokio::test]
async fn test_rating_resubmission_replaces_previous_value() {
    let db = test_db().await;
    let asker = seed_user(&db, "asker").await;
    let answerer = seed_user(&db, "answerer").await;
    let rater = seed_user(&db, "rater").await;
    let question = seed_question(&db, asker, "A question").await;
    let answer = seed_answer(&db, question, answerer).await;

    let first = db.submit_rating(answer, rater, 2.0).await.unwrap();
    assert_eq!(first.count, 1);
    assert_eq!(first.average, 2.0);

    let second = db.submit_rating(answer, rater, 5.0).await.unwrap();
    assert_eq!(second.count, 1);
    assert_eq!(second.average, 5.0);

    assert_eq!(db.find_user_rating(answer, rater).await.unwrap(), Some(5.0));
}

#[tokio::test]
async fn test_racing_first_time_rating_is_conflict() {
    use super::entities::rating;
    use super::rating_ops::map_duplicate_rating;
    use sea_orm::{ActiveModelTrait, Set};

    let db = test_db().await;
    let asker = seed_user(&db, "asker").await;
    let answerer = seed_user(&db, "answerer").await;
    let rater = seed_user(&db, "rater").await;
    let question = seed_question(&db, asker, "A question").await;
    let answer = seed_answer(&db, question, answerer).await;

    db.submit_rating(answer, rater, 4.0).await.unwrap();

    // A second insert of the same (answer, user) pair is exactly what
    // the loser of two concurrent first-time submissions attempts after
    // both passed the existence check.
    let err = rating::ActiveModel {
        answer_id: Set(answer),
        user_id: Set(rater),
        value: Set(3.0),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db.connection())
    .await
    .unwrap_err();

    assert!(matches!(
        map_duplicate_rating(err),
        ForumError::Conflict(_)
    ));
}

#[tokio::test]
async fn test_rating_average_rounds_to_one_decimal() {
    let db = test_db().await;
    let asker = seed_user(&db, "asker").await;
    let answerer = seed_user(&db, "answerer").await;
    let rater_a = seed_user(&db, "rater_a").await;
    let rater_b = seed_user(&db, "rater_b").await;
    let question = seed_question(&db, asker, "A question").await;
    let answer = seed_answer(&db, question, answerer).await;

    let first = db.submit_rating(answer, rater_a, 4.5).await.unwrap();
    assert_eq!(first.average, 4.5);
    assert_eq!(first.count, 1);

    // mean(4.5, 3.0) = 3.75, rounded half-up to 3.8
    let second = db.submit_rating(answer, rater_b, 3.0).await.unwrap();
    assert_eq!(second.average, 3.8);
    assert_eq!(second.count, 2);
}

#[tokio::test]
async fn test_reset_token_is_single_use() {
    let db = test_db().await;
    let user = seed_user(&db, "alice").await;

    db.set_reset_token(
        user,
        "digest-abc".to_string(),
        Utc::now() + Duration::hours(1),
    )
    .await
    .unwrap();

    let consumed = db
        .reset_password_by_token("digest-abc", "new-hash".to_string())
        .await
        .unwrap();
    assert!(consumed);

    let found = db.find_user_by_id(user).await.unwrap().unwrap();
    assert_eq!(found.password_hash, "new-hash");
    assert!(found.reset_token_hash.is_none());
    assert!(found.reset_token_expires_at.is_none());

    // Second attempt with the same token must fail.
    let replayed = db
        .reset_password_by_token("digest-abc", "other-hash".to_string())
        .await
        .unwrap();
    assert!(!replayed);
}

#[tokio::test]
async fn test_expired_reset_token_is_rejected() {
    let db = test_db().await;
    let user = seed_user(&db, "alice").await;

    db.set_reset_token(
        user,
        "digest-old".to_string(),
        Utc::now() - Duration::minutes(1),
    )
    .await
    .unwrap();

    let consumed = db
        .reset_password_by_token("digest-old", "new-hash".to_string())
        .await
        .unwrap();
    assert!(!consumed);

    let found = db.find_user_by_id(user).await.unwrap().unwrap();
    assert_eq!(found.password_hash, "not-a-real-hash");
}

#[tokio::test]
async fn test_question_listing_is_newest_first_and_paginated() {
    let db = test_db().await;
    let user = seed_user(&db, "alice").await;
    for i in 0..5 {
        seed_question(&db, user, &format!("Question {i}")).await;
        // Monotonic timestamps for a stable ordering assertion
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let page = db.list_questions(1, 2).await.unwrap();
    assert_eq!(page.questions.len(), 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.questions[0].0.title, "Question 4");
    assert_eq!(page.questions[1].0.title, "Question 3");

    let author = page.questions[0].1.as_ref().unwrap();
    assert_eq!(author.username, "alice");
}

#[tokio::test]
async fn test_search_matches_title_and_description() {
    let db = test_db().await;
    let user = seed_user(&db, "alice").await;
    seed_question(&db, user, "Borrow checker fight").await;
    db.create_question(NewQuestion {
        user_id: user,
        title: "Unrelated".to_string(),
        description: "This mentions the borrow checker in passing".to_string(),
        tag: None,
        category_id: None,
    })
    .await
    .unwrap();
    seed_question(&db, user, "Something else entirely").await;

    let page = db.search_questions("borrow", 1, 10).await.unwrap();
    assert_eq!(page.questions.len(), 2);
}
