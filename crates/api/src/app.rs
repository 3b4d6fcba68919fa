use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use chrono::Duration as ChronoDuration;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_admin_session, security_headers_middleware,
    trace_id,
};
use crate::routes::{admin, health, register, registrations, settings};
use crate::services::login_attempts::{InMemoryLoginAttempts, LoginAttemptStore};
use crate::services::notify::{RegistrationNotifier, WebhookNotifier};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub login_attempts: Arc<dyn LoginAttemptStore>,
    pub notifier: Arc<dyn RegistrationNotifier>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let login_attempts: Arc<dyn LoginAttemptStore> = Arc::new(InMemoryLoginAttempts::new(
        config.admin.max_login_attempts,
        ChronoDuration::seconds(config.admin.login_block_secs),
    ));
    let notifier: Arc<dyn RegistrationNotifier> =
        Arc::new(WebhookNotifier::from_config(&config.notifications));

    let state = AppState {
        pool,
        config: config.clone(),
        login_attempts,
        notifier,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Admin routes (require a valid session cookie)
    let admin_routes = Router::new()
        .route(
            "/register/settings",
            get(settings::get_settings).patch(settings::update_settings),
        )
        .route("/registrations", get(registrations::list_registrations))
        .route(
            "/registrations/export",
            get(registrations::export_registrations),
        )
        .route(
            "/registrations/:id",
            patch(registrations::update_registration),
        )
        .route(
            "/registrations/:id/attendance",
            patch(registrations::update_attendance),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_session,
        ));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/register", post(register::submit_registration))
        .route("/register/status", get(register::registration_status))
        .route("/admin/login", post(admin::login))
        .route("/admin/logout", post(admin::logout))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::ready))
        .route("/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
