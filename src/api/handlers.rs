//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{
    events::PluginMessage,
    state::AppState,
    sync::{Event, UserAction},
};
use super::responses::{ActionResponse, HealthResponse, SessionRequest, StatusResponse};

type ActionResult = Result<(StatusCode, Json<ActionResponse>), StatusCode>;

/// Run a user action: 202 when carried out, 409 when the sidebar refused it
async fn user_action(state: &AppState, action: UserAction, done: &str) -> ActionResult {
    match state.act(action).await {
        Ok(Ok(())) => {
            info!("{}", done);
            Ok((
                StatusCode::ACCEPTED,
                Json(ActionResponse::accepted(done.to_string(), state.view())),
            ))
        }
        Ok(Err(rejection)) => Ok((
            StatusCode::CONFLICT,
            Json(ActionResponse::rejected(rejection, state.view())),
        )),
        Err(e) => {
            error!("Failed to run {:?}: {}", action, e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Queue a host event; 202 once the event loop has it
fn post_event(state: &AppState, event: Event) -> Result<StatusCode, StatusCode> {
    state.post(event).map(|()| StatusCode::ACCEPTED).map_err(|e| {
        error!("Failed to queue event: {}", e);
        StatusCode::SERVICE_UNAVAILABLE
    })
}

/// Handle POST /power/toggle
pub async fn toggle_power_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    user_action(&state, UserAction::TogglePower, "Printer power toggle sent").await
}

/// Handle POST /management/toggle
pub async fn toggle_management_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    user_action(&state, UserAction::ToggleManagement, "Power management toggle sent").await
}

/// Handle POST /countdown/abort
pub async fn abort_countdown_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    user_action(&state, UserAction::AbortCountdown, "Shutdown countdown aborted").await
}

/// Handle POST /session - host login state changed
pub async fn session_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SessionRequest>,
) -> Result<StatusCode, StatusCode> {
    post_event(&state, Event::Session { logged_in: request.logged_in })
}

/// Handle POST /hooks/startup-complete
pub async fn startup_complete_handler(State(state): State<Arc<AppState>>) -> Result<StatusCode, StatusCode> {
    post_event(&state, Event::StartupComplete)
}

/// Handle POST /hooks/reconnect
pub async fn reconnect_handler(State(state): State<Arc<AppState>>) -> Result<StatusCode, StatusCode> {
    post_event(&state, Event::Reconnected)
}

/// Handle POST /hooks/plugin-message - push event dispatch entry point
pub async fn plugin_message_handler(
    State(state): State<Arc<AppState>>,
    Json(message): Json<PluginMessage>,
) -> Result<StatusCode, StatusCode> {
    post_event(&state, Event::Plugin(message))
}

/// Handle GET /status - Return the rendered sidebar
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        sidebar: state.view(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
