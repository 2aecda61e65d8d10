//! Remote automation-agent client (AI-driven page actions)
//!
//! The agent is an external service: it receives a natural-language
//! action and performs it on a cloud browser session it manages itself.
//! This module only tracks the singleton remote session and relays
//! calls.

use crate::config::Settings;
use crate::error::{RelayError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;

/// Client for the remote automation agent
#[async_trait]
pub trait AutomationAgent: Send + Sync {
    /// Perform a natural-language action, optionally navigating first
    async fn act(&self, action: &str, url: Option<&str>) -> Result<Value>;

    /// End the remote agent session; failures are swallowed
    async fn close(&self);
}

/// HTTP client for the Stagehand agent API
///
/// The remote session is created lazily on the first `act` call and
/// reused for the process lifetime.
pub struct StagehandClient {
    http: reqwest::Client,
    agent_url: String,
    api_key: String,
    project_id: String,
    session: Mutex<Option<String>>,
}

impl StagehandClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: reqwest::Client::new(),
            agent_url: settings.agent_url.clone(),
            api_key: settings.api_key.clone(),
            project_id: settings.project_id.clone(),
            session: Mutex::new(None),
        }
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        let response = self
            .http
            .post(format!("{}/{}", self.agent_url, path))
            .header("x-bb-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::AgentFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| RelayError::AgentFailed(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| RelayError::AgentFailed(e.to_string()))
    }

    /// Return the remote session id, creating the session on first use
    async fn ensure_session(&self) -> Result<String> {
        let mut session = self.session.lock().await;
        if let Some(id) = session.as_ref() {
            return Ok(id.clone());
        }

        let created = self
            .post("sessions", json!({ "projectId": self.project_id }))
            .await?;

        let id = created["id"]
            .as_str()
            .ok_or_else(|| RelayError::AgentFailed("session response missing id".to_string()))?
            .to_string();

        log::info!("Started agent session {}", id);
        *session = Some(id.clone());
        Ok(id)
    }
}

#[async_trait]
impl AutomationAgent for StagehandClient {
    async fn act(&self, action: &str, url: Option<&str>) -> Result<Value> {
        let session = self.ensure_session().await?;

        if let Some(url) = url {
            self.post(&format!("sessions/{}/navigate", session), json!({ "url": url }))
                .await?;
        }

        self.post(&format!("sessions/{}/act", session), json!({ "action": action }))
            .await
    }

    async fn close(&self) {
        let id = self.session.lock().await.take();
        if let Some(id) = id {
            if let Err(e) = self.post(&format!("sessions/{}/end", id), json!({})).await {
                log::error!("Error ending agent session {}: {}", id, e);
            }
        }
    }
}
