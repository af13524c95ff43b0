//! Session middleware
//!
//! Every non-public request must carry a bearer token that verifies
//! against the signing key AND resolves to a user who still exists. A
//! token for a deleted account is rejected even if its signature and
//! expiry are valid. Rejections short-circuit before the inner service
//! runs.

use crate::server::middleware::helpers::{extract_bearer_token, is_public_route};
use crate::server::state::AppState;
use crate::utils::error::ForumError;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ErrorInternalServerError;
use actix_web::{web, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::{debug, warn};
use uuid::Uuid;

/// The authenticated user's id, stored in request extensions
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

/// Session middleware for Actix-web
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for the session middleware
pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        if is_public_route(req.method(), req.path()) {
            return Box::pin(async move { service.call(req).await });
        }

        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = extract_bearer_token(req.headers());

        Box::pin(async move {
            let Some(state) = state else {
                return Err(ErrorInternalServerError("Application state missing"));
            };

            let Some(token) = token else {
                debug!("Missing bearer token for {}", req.path());
                return Err(unauthorized("Please log in"));
            };

            let claims = match state.jwt.verify_token(&token) {
                Ok(claims) => claims,
                Err(e) => {
                    warn!("Token verification failed: {}", e);
                    return Err(unauthorized("Invalid or expired login"));
                }
            };

            // Tokens outlive accounts; confirm the subject still exists.
            match state.db.find_user_by_id(claims.sub).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    warn!("Valid token for nonexistent user {}", claims.sub);
                    return Err(unauthorized("User not found"));
                }
                Err(e) => {
                    warn!("Session lookup failed: {}", e);
                    return Err(e.into());
                }
            }

            req.extensions_mut().insert(CurrentUser(claims.sub));
            service.call(req).await
        })
    }
}

fn unauthorized(message: &str) -> actix_web::Error {
    ForumError::unauthenticated(message).into()
}

/// Fetch the authenticated user id placed by the middleware
pub fn current_user_id(req: &HttpRequest) -> Result<Uuid, actix_web::Error> {
    req.extensions()
        .get::<CurrentUser>()
        .map(|u| u.0)
        .ok_or_else(|| ErrorInternalServerError("Missing authenticated user"))
}
