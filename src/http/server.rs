//! Main router configuration assembling the client endpoints.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    context::AppState,
    handler_clients::{create_client_handler, delete_client_handler, get_client_handler},
};

/// Path prefix every registry route is served under
pub const API_PREFIX: &str = "/api/v0";

/// Build the application router
pub fn build_router(ctx: AppState) -> Router {
    let client_routes = Router::new()
        .route("/clients", post(create_client_handler))
        .route(
            "/clients/{id}",
            get(get_client_handler).delete(delete_client_handler),
        );

    Router::new()
        .nest(API_PREFIX, client_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
