use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use rupath_core::chat::{Assistant, Reply, SessionStore};
use rupath_core::routing::plan_to_json;
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::fallback::resolve_fallback;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    /// Same text as `reply`, for older clients
    pub response: String,
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub origin: String,
    pub destination: String,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/plan", post(plan))
        .route("/api/test", get(health))
        .route("/api/reset", post(reset))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let session_id = SessionStore::session_id(req.session_id.as_deref()).to_string();

    let reply = {
        let mut sessions = state.sessions();
        let ctx = sessions.context(&session_id);
        Assistant::new(&state.model).reply(ctx, &req.message)
    };

    let text = match reply {
        Reply::Answer(text) => text,
        Reply::Fallback { hint } => {
            debug!(session_id = %session_id, "No dataset answer, using fallback");
            resolve_fallback(state.llm.as_ref(), &req.message, hint).await
        }
    };

    Json(ChatResponse {
        reply: text.clone(),
        response: text,
        session_id,
    })
}

async fn plan(State(state): State<Arc<AppState>>, Json(req): Json<PlanRequest>) -> Json<JsonValue> {
    let result = state.model.planner().plan(&req.origin, &req.destination);
    Json(plan_to_json(&result))
}

async fn health() -> Json<JsonValue> {
    Json(json!({"status": "ok"}))
}

async fn reset(State(state): State<Arc<AppState>>) -> Json<JsonValue> {
    let mut sessions = state.sessions();
    let cleared = sessions.len();
    sessions.clear();
    info!(cleared, "Sessions reset");
    Json(json!({"status": "reset"}))
}
