//! HTTP server: routes, middleware, and application state

pub mod builder;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;


pub use server::HttpServer;
pub use state::AppState;
