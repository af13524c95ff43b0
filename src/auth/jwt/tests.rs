use super::types::{Claims, JwtHandler};
use crate::config::AuthConfig;
use jsonwebtoken::{encode, Header};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

fn test_config(secret: &str) -> AuthConfig {
    AuthConfig {
        jwt_secret: secret.to_string(),
        jwt_expiration: 3600,
        issuer: "forumd".to_string(),
    }
}

fn handler() -> JwtHandler {
    JwtHandler::new(&test_config("test-secret-test-secret-test-secret"))
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

#[test]
fn test_issue_and_verify_roundtrip() {
    let handler = handler();
    let user_id = Uuid::new_v4();

    let token = handler.issue_token(user_id).unwrap();
    let claims = handler.verify_token(&token).unwrap();

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.iss, "forumd");
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_tampered_token_rejected() {
    let handler = handler();
    let token = handler.issue_token(Uuid::new_v4()).unwrap();

    // Flip a character in the payload segment
    let mut chars: Vec<char> = token.chars().collect();
    let mid = token.len() / 2;
    chars[mid] = if chars[mid] == 'a' { 'b' } else { 'a' };
    let tampered: String = chars.into_iter().collect();

    assert!(handler.verify_token(&tampered).is_err());
}

#[test]
fn test_wrong_secret_rejected() {
    let signer = JwtHandler::new(&test_config("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));
    let verifier = JwtHandler::new(&test_config("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"));

    let token = signer.issue_token(Uuid::new_v4()).unwrap();
    assert!(verifier.verify_token(&token).is_err());
}

#[test]
fn test_malformed_token_rejected() {
    let handler = handler();
    assert!(handler.verify_token("").is_err());
    assert!(handler.verify_token("not.a.jwt").is_err());
    assert!(handler.verify_token("garbage").is_err());
}

#[test]
fn test_expired_token_rejected() {
    let handler = handler();

    let claims = Claims {
        sub: Uuid::new_v4(),
        iat: now() - 7200,
        exp: now() - 3600,
        iss: "forumd".to_string(),
    };
    let token = encode(
        &Header::new(handler.algorithm),
        &claims,
        &handler.encoding_key,
    )
    .unwrap();

    assert!(handler.verify_token(&token).is_err());
}

#[test]
fn test_wrong_issuer_rejected() {
    let handler = handler();

    let claims = Claims {
        sub: Uuid::new_v4(),
        iat: now(),
        exp: now() + 3600,
        iss: "someone-else".to_string(),
    };
    let token = encode(
        &Header::new(handler.algorithm),
        &claims,
        &handler.encoding_key,
    )
    .unwrap();

    assert!(handler.verify_token(&token).is_err());
}
