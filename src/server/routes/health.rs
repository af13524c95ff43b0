//! Health check endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{web, HttpResponse, Result as ActixResult};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Basic health status
#[derive(Debug, Clone, serde::Serialize)]
struct HealthStatus {
    status: Cow<'static, str>,
    database: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
}

/// Liveness plus a database round trip
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let db_up = state.db.health_check().await.is_ok();
    Ok(render(db_up))
}

fn render(db_up: bool) -> HttpResponse {
    if !db_up {
        return HttpResponse::ServiceUnavailable().json(ApiResponse::<HealthStatus>::error(
            "Service degraded: database unreachable".to_string(),
        ));
    }

    HttpResponse::Ok().json(ApiResponse::success(HealthStatus {
        status: Cow::Borrowed("healthy"),
        database: Cow::Borrowed("up"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_degraded_database_uses_error_envelope() {
        let resp = render(false);
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["success"], json!(false));
        assert!(value["error"].as_str().unwrap().contains("database"));
        assert!(value.get("data").is_none());
    }

    #[actix_web::test]
    async fn test_healthy_database_uses_success_envelope() {
        let resp = render(true);
        assert_eq!(resp.status(), StatusCode::OK);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"]["database"], json!("up"));
    }
}
