//! HTTP API module
//! 
//! The local surface the host UI talks to: the rendered sidebar, the user
//! affordances and the host lifecycle hooks.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/power/toggle", post(toggle_power_handler))
        .route("/management/toggle", post(toggle_management_handler))
        .route("/countdown/abort", post(abort_countdown_handler))
        .route("/session", post(session_handler))
        // Host lifecycle hooks
        .route("/hooks/startup-complete", post(startup_complete_handler))
        .route("/hooks/reconnect", post(reconnect_handler))
        .route("/hooks/plugin-message", post(plugin_message_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
