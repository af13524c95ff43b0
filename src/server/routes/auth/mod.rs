//! Authentication endpoints

pub mod login;
pub mod models;
pub mod password;
pub mod register;
pub mod user;

use actix_web::web;

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/register", web::post().to(register::register))
            .route("/login", web::post().to(login::login))
            .route("/forgot-password", web::post().to(password::forgot_password))
            .route("/reset-password", web::post().to(password::reset_password))
            .route("/me", web::get().to(user::current_user)),
    );
}
