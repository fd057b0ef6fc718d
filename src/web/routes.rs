//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Screens
        .route("/", get(handlers::root))
        .route("/pagina-inicial", get(handlers::dashboard))
        .route("/entidades", get(handlers::entities_list))
        .route(
            "/entidades/detalhe/:id",
            get(handlers::entity_detail).post(handlers::entity_submit),
        )
        .route("/ordens-de-servico", get(handlers::work_orders_list))
        .route(
            "/ordens-de-servico/detalhe/:id",
            get(handlers::work_order_detail).post(handlers::work_order_submit),
        )
        // API routes
        .route("/api/lookups/:source", get(handlers::lookup_options))
        .route("/health", get(handlers::health))
        .fallback(handlers::root)
        // Add middleware
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        // Add state
        .with_state(state)
}
