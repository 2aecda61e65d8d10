//! HTTP surface: routing, request/response envelopes, and the
//! advanced-automation request lifecycle

use crate::agent::{AutomationAgent, StagehandClient};
use crate::browser::cdp::CdpConnector;
use crate::browser::pool::BrowserPool;
use crate::browser::session::SessionRegistry;
use crate::browser::EngineTag;
use crate::config::Settings;
use crate::error::{RelayError, Result};
use crate::script::{RawScript, Script};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;

const SERVICE_NAME: &str = "browser-relay";
const CAPABILITIES: [&str; 2] = ["stagehand", "cdp"];

/// RFC 3339 UTC timestamp used in every envelope
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Shared service state, explicitly constructed and passed by reference
/// so tests can substitute fakes
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<BrowserPool>,
    pub registry: Arc<SessionRegistry>,
    pub agent: Arc<dyn AutomationAgent>,
}

impl AppState {
    /// Production wiring: CDP connector and Stagehand agent from settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            pool: Arc::new(BrowserPool::new(Arc::new(CdpConnector::new(
                settings.clone(),
            )))),
            registry: Arc::new(SessionRegistry::new()),
            agent: Arc::new(StagehandClient::new(settings)),
        }
    }
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/mcp", post(mcp))
        .route("/automation/ai", post(automation_ai))
        .route("/automation/advanced", post(automation_advanced))
        .route("/sessions", get(sessions))
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(state)
}

/// Release shared resources, in order: agent session, pooled
/// connections, leftover sessions. Close errors are logged, never fatal.
pub async fn shutdown(state: &AppState) {
    log::info!("Shutting down gracefully...");
    state.agent.close().await;
    state.pool.shutdown();
    state.registry.clear();
}

#[derive(Debug, Deserialize)]
struct McpRequest {
    tool: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Deserialize)]
struct AiRequest {
    action: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvancedOptions {
    /// Engine tag; unrecognized values fall back to chromium
    pub browser_type: Option<String>,
    /// User agent applied to the session's page
    pub user_agent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdvancedRequest {
    script: RawScript,
    #[serde(default)]
    options: AdvancedOptions,
}

/// Error envelope for `/mcp`: {success:false, error, timestamp}
struct McpFailure(RelayError);

impl From<RelayError> for McpFailure {
    fn from(err: RelayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for McpFailure {
    fn into_response(self) -> Response {
        log::error!("mcp request failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "error": self.0.to_string(),
                "timestamp": iso_timestamp(),
            })),
        )
            .into_response()
    }
}

/// Error envelope for the dedicated automation endpoints: {error}
struct AutomationFailure(RelayError);

impl From<RelayError> for AutomationFailure {
    fn from(err: RelayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AutomationFailure {
    fn into_response(self) -> Response {
        log::error!("automation request failed: {}", self.0);
        let body = match &self.0 {
            RelayError::Automation {
                method,
                session_id,
                message,
                timestamp,
            } => json!({
                "error": message,
                "method": method,
                "sessionId": session_id,
                "timestamp": timestamp,
            }),
            other => json!({ "error": other.to_string() }),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "capabilities": CAPABILITIES,
        "timestamp": iso_timestamp(),
    }))
}

async fn sessions(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "active_sessions": state.registry.ids() }))
}

async fn mcp(
    State(state): State<AppState>,
    Json(request): Json<McpRequest>,
) -> std::result::Result<Json<Value>, McpFailure> {
    let result = match request.tool.as_str() {
        "ai_automation" => {
            let params: AiRequest = serde_json::from_value(request.params)
                .map_err(|e| RelayError::InvalidParams(e.to_string()))?;
            run_ai(&state, &params.action, params.url.as_deref()).await?
        }
        "advanced_automation" => {
            let params: AdvancedRequest = serde_json::from_value(request.params)
                .map_err(|e| RelayError::InvalidParams(e.to_string()))?;
            run_advanced(state.clone(), params.script, params.options).await?
        }
        other => return Err(RelayError::UnknownTool(other.to_string()).into()),
    };

    Ok(Json(json!({ "success": true, "result": result })))
}

async fn automation_ai(
    State(state): State<AppState>,
    Json(request): Json<AiRequest>,
) -> std::result::Result<Json<Value>, AutomationFailure> {
    let result = run_ai(&state, &request.action, request.url.as_deref()).await?;
    Ok(Json(result))
}

async fn automation_advanced(
    State(state): State<AppState>,
    Json(request): Json<AdvancedRequest>,
) -> std::result::Result<Json<Value>, AutomationFailure> {
    let result = run_advanced(state, request.script, request.options).await?;
    Ok(Json(result))
}

/// AI path: relay the action to the agent and wrap its result
async fn run_ai(state: &AppState, action: &str, url: Option<&str>) -> Result<Value> {
    let result = state.agent.act(action, url).await?;

    Ok(json!({
        "method": "stagehand+browserbase",
        "action": action,
        "result": result,
        "undetectable": true,
        "timestamp": iso_timestamp(),
    }))
}

/// Advanced path: parse the script (unknown kinds fail before any
/// connection is made), then run the session lifecycle on a blocking
/// task since CDP calls block
async fn run_advanced(
    state: AppState,
    raw: RawScript,
    options: AdvancedOptions,
) -> Result<Value> {
    let script = Script::parse(&raw)?;
    let engine = EngineTag::parse(options.browser_type.as_deref().unwrap_or(""));

    tokio::task::spawn_blocking(move || execute_advanced(&state, &script, engine, &options))
        .await
        .map_err(|e| RelayError::TaskFailed(e.to_string()))?
}

/// One advanced-automation session: acquire pooled connection, open a
/// page, register a session, run the workflow, and tear the session down
/// on every exit path
fn execute_advanced(
    state: &AppState,
    script: &Script,
    engine: EngineTag,
    options: &AdvancedOptions,
) -> Result<Value> {
    let browser = state.pool.acquire(engine)?;
    let page = browser.new_page()?;
    let session_id = state.registry.create(page.clone())?;
    let started = Instant::now();

    let outcome = (|| {
        if let Some(user_agent) = options.user_agent.as_deref() {
            page.set_user_agent(user_agent)?;
        }
        script.run(page.as_ref())
    })();

    state.registry.remove(&session_id);

    match outcome {
        Ok(result) => Ok(json!({
            "method": "cdp+browserbase",
            "browserType": engine.as_str(),
            "sessionId": session_id,
            "script": script.kind(),
            "result": result,
            "undetectable": true,
            "timestamp": iso_timestamp(),
            "duration_ms": started.elapsed().as_millis() as u64,
        })),
        Err(e) => Err(RelayError::Automation {
            method: "cdp+browserbase".to_string(),
            session_id,
            message: e.to_string(),
            timestamp: iso_timestamp(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advanced_options_camel_case() {
        let options: AdvancedOptions = serde_json::from_value(json!({
            "browserType": "firefox",
            "userAgent": "RelayBot/1.0",
        }))
        .unwrap();

        assert_eq!(options.browser_type.as_deref(), Some("firefox"));
        assert_eq!(options.user_agent.as_deref(), Some("RelayBot/1.0"));
    }

    #[test]
    fn test_advanced_options_default_empty() {
        let options: AdvancedOptions = serde_json::from_value(json!({})).unwrap();
        assert!(options.browser_type.is_none());
        assert!(options.user_agent.is_none());
    }

    #[test]
    fn test_advanced_request_options_optional() {
        let request: AdvancedRequest = serde_json::from_value(json!({
            "script": {"kind": "custom", "params": {"code": "return 1;"}},
        }))
        .unwrap();

        assert_eq!(request.script.kind, "custom");
        assert!(request.options.browser_type.is_none());
    }

    #[test]
    fn test_iso_timestamp_shape() {
        let ts = iso_timestamp();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
