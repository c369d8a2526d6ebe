//! services/perfect_day/src/web/mod.rs
//!
//! The HTTP surface: route table, shared state and the middleware stack.

pub mod auth;
pub mod health;
pub mod middleware;
pub mod places;
pub mod response;
pub mod rest;
pub mod state;
pub mod users;


pub use middleware::require_auth;
pub use rest::ApiDoc;
pub use state::AppState;

use crate::config::ConfigError;
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the complete application: `/api/v1` routes, Swagger UI, CORS and
/// request tracing.
pub fn build_router(app_state: Arc<AppState>) -> Result<Router, ConfigError> {
    let origin = app_state
        .config
        .cors_allowed_origin
        .parse::<HeaderValue>()
        .map_err(|e| ConfigError::InvalidValue("CORS_ALLOWED_ORIGIN".to_string(), e.to_string()))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_handler))
        .route("/version", get(health::version_handler))
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route("/perfect-days", get(rest::list_days_handler))
        .route("/perfect-days/{id}", get(rest::get_day_handler))
        .route("/users/{username}", get(users::get_user_handler))
        .route("/users/{username}/perfect-days", get(users::list_user_days_handler))
        .route("/places/search", get(places::search_places_handler))
        .route("/areas", get(places::list_areas_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route("/perfect-days", post(rest::create_day_handler))
        .route(
            "/perfect-days/{id}",
            axum::routing::put(rest::update_day_handler).delete(rest::delete_day_handler),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes);

    let app = Router::new()
        .nest("/api/v1", api_router)
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Ok(app)
}
