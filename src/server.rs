use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use http::{HeaderValue, StatusCode};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::classifier::{classify_in_context, ClassifierLimits};
use crate::context::InvocationContext;
use crate::models::ScenarioInput;
use crate::util::{env_flag, error_response};

/// Header carrying the simulated invocation's request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Immutable settings shared by the simulation handlers.
#[derive(Debug, Clone)]
pub struct SimulatorState {
    pub function_name: String,
    pub limits: ClassifierLimits,
    /// Echo the classified response as `{statusCode, error, body}` instead of
    /// unwrapping it into a plain HTTP response.
    pub envelope: bool,
}

impl Default for SimulatorState {
    fn default() -> Self {
        Self {
            function_name: crate::context::DEFAULT_FUNCTION_NAME.to_string(),
            limits: ClassifierLimits::default(),
            envelope: false,
        }
    }
}

impl SimulatorState {
    /// Environment:
    /// - WOOFY_FUNCTION_NAME                          -> simulated function name
    /// - WOOFY_MAX_BODY_CHARS / WOOFY_MAX_USER_ID_CHARS -> classifier limits
    /// - WOOFY_ENVELOPE = 1|true|yes|on               -> return the Lambda envelope
    pub fn from_env() -> Self {
        Self {
            function_name: InvocationContext::function_name_from_env(),
            limits: ClassifierLimits::from_env(),
            envelope: env_flag("WOOFY_ENVELOPE"),
        }
    }
}

/// Build the Axum router with `/status` and `/simulate`, using defaults.
pub fn build_router() -> Router {
    build_router_with_state(SimulatorState::default())
}

/// Build the Axum router over explicit simulator settings.
pub fn build_router_with_state(state: SimulatorState) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/simulate", post(simulate))
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

async fn status(State(state): State<Arc<SimulatorState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "woofy-sim",
        "version": env!("CARGO_PKG_VERSION"),
        "function_name": state.function_name,
        "routes": ["/status", "/simulate"]
    }))
}

/// Classify the posted scenario and answer with the handler's canned response.
async fn simulate(State(state): State<Arc<SimulatorState>>, body: Bytes) -> Response {
    // `null` is a valid scenario: the handler received a null event.
    let scenario: Option<ScenarioInput> = match serde_json::from_slice(&body) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("rejecting malformed scenario: {}", e);
            return error_response(StatusCode::BAD_REQUEST, &format!("invalid scenario: {e}"));
        }
    };

    let ctx = InvocationContext::new(&state.function_name);
    let classified = classify_in_context(&ctx, scenario.as_ref(), &state.limits);

    let mut resp = if state.envelope {
        Json(classified).into_response()
    } else {
        classified.into_response()
    };
    if let Ok(v) = HeaderValue::from_str(&ctx.request_id) {
        resp.headers_mut().insert(REQUEST_ID_HEADER, v);
    }
    resp
}
