//! Helper functions for middleware

use actix_web::http::header::HeaderMap;
use actix_web::http::Method;

/// Extract a bearer token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;
    auth_str.strip_prefix("Bearer ").map(|t| t.to_string())
}

/// Check if a route is public (doesn't require a session)
///
/// Reads are public for questions and search; everything that writes, and
/// everything touching the caller's identity, requires a verified session.
pub fn is_public_route(method: &Method, path: &str) -> bool {
    if path == "/health" {
        return true;
    }

    if method == Method::POST {
        const PUBLIC_POSTS: &[&str] = &[
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/forgot-password",
            "/api/auth/reset-password",
        ];
        if PUBLIC_POSTS.contains(&path) {
            return true;
        }
    }

    if method == Method::GET {
        const PUBLIC_PREFIXES: &[&str] = &["/api/questions", "/api/search"];
        if PUBLIC_PREFIXES
            .iter()
            .any(|&route| path == route || path.starts_with(&format!("{route}/")) || path.starts_with(&format!("{route}?")))
        {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("authorization"),
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        let headers = headers_with_auth("Bearer abc.def.ghi");
        assert_eq!(
            extract_bearer_token(&headers),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_non_bearer_schemes_rejected() {
        assert_eq!(extract_bearer_token(&headers_with_auth("Basic dXNlcg==")), None);
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_public_routes() {
        assert!(is_public_route(&Method::GET, "/health"));
        assert!(is_public_route(&Method::POST, "/api/auth/login"));
        assert!(is_public_route(&Method::POST, "/api/auth/register"));
        assert!(is_public_route(&Method::GET, "/api/questions"));
        assert!(is_public_route(
            &Method::GET,
            "/api/questions/0a570751-1111-2222-3333-444455556666"
        ));
        assert!(is_public_route(&Method::GET, "/api/search"));
    }

    #[test]
    fn test_protected_routes() {
        assert!(!is_public_route(&Method::POST, "/api/questions"));
        assert!(!is_public_route(&Method::GET, "/api/answers/abc"));
        assert!(!is_public_route(&Method::POST, "/api/ratings"));
        assert!(!is_public_route(&Method::GET, "/api/auth/me"));
        assert!(!is_public_route(&Method::PUT, "/api/content/5"));
        // Registration is only public as a POST
        assert!(!is_public_route(&Method::GET, "/api/auth/register"));
    }
}
