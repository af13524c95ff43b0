//! HTTP server core implementation

use crate::auth::JwtHandler;
use crate::config::{Config, ServerConfig};
use crate::notify;
use crate::server::middleware::AuthMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::ForumDatabase;
use crate::utils::error::Result;
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer as ActixHttpServer};
use tracing::{info, warn};

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        config.validate()?;
        crate::utils::error::set_development_mode(config.server.development);

        let db = ForumDatabase::connect(&config.database).await?;
        db.migrate().await?;

        let jwt = JwtHandler::new(&config.auth);
        let notifier = notify::build_notifier(&config.email)?;

        let state = AppState::new(config.clone(), jwt, db, notifier);

        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    /// Create the Actix-web application
    pub(crate) fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors_config = &state.config.server.cors;
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allow_any_header()
            .max_age(3600);

        if cors_config.enabled {
            if cors_config.allows_all_origins() {
                warn!("CORS configured to allow any origin");
                cors = cors.allow_any_origin();
            } else {
                for origin in &cors_config.allowed_origins {
                    cors = cors.allowed_origin(origin);
                }
            }
        }

        App::new()
            .app_data(state)
            .wrap(AuthMiddleware)
            .wrap(cors)
            .wrap(Logger::default())
            .configure(routes::health::configure_routes)
            .configure(routes::auth::configure_routes)
            .configure(routes::questions::configure_routes)
            .configure(routes::answers::configure_routes)
            .configure(routes::content::configure_routes)
            .configure(routes::ratings::configure_routes)
            .configure(routes::search::configure_routes)
            .configure(routes::categories::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);
        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);
        ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)?
            .run()
            .await?;

        Ok(())
    }
}
