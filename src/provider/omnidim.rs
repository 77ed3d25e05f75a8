//! OmniDimension voice-agent provider (live HTTP API)

use async_trait::async_trait;
use serde_json::{json, Value};
use std::env;
use tracing::debug;

use super::VoiceAgentProvider;
use crate::config::ProviderSettings;
use crate::domain::{AgentBlueprint, CallContext, CallLogQuery};
use crate::error::{ProviderError, ProviderResult};

/// OmniDimension provider
pub struct OmniDimProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OmniDimProvider {
    /// Create a new OmniDimension provider from configuration.
    ///
    /// The credential is taken from `settings.api_key` when present,
    /// otherwise from the environment variable named by
    /// `settings.api_key_env`. Empty values count as absent.
    pub fn new(settings: &ProviderSettings) -> ProviderResult<Self> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| {
                env::var(&settings.api_key_env)
                    .ok()
                    .filter(|key| !key.is_empty())
            })
            .ok_or_else(|| {
                ProviderError::Authentication(format!(
                    "API key not provided and environment variable {} not set",
                    settings.api_key_env
                ))
            })?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a prepared request with the bearer credential attached and
    /// decode the JSON body
    async fn execute(&self, request: reqwest::RequestBuilder) -> ProviderResult<Value> {
        let response = request
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl VoiceAgentProvider for OmniDimProvider {
    fn name(&self) -> &str {
        "omnidimension"
    }

    async fn create_agent(&self, blueprint: &AgentBlueprint) -> ProviderResult<Value> {
        debug!("POST /agents/create for '{}'", blueprint.name);
        self.execute(self.client.post(self.url("/agents/create")).json(blueprint))
            .await
    }

    async fn dispatch_call(
        &self,
        agent_id: &str,
        to_number: &str,
        call_context: &CallContext,
    ) -> ProviderResult<Value> {
        let body = json!({
            "agent_id": agent_id,
            "to_number": to_number,
            "call_context": call_context,
        });

        debug!("POST /calls/dispatch for agent {}", agent_id);
        self.execute(self.client.post(self.url("/calls/dispatch")).json(&body))
            .await
    }

    async fn get_call_log(&self, call_id: &str) -> ProviderResult<Value> {
        debug!("GET /calls/logs/{}", call_id);
        self.execute(self.client.get(self.url(&format!("/calls/logs/{}", call_id))))
            .await
    }

    async fn list_call_logs(&self, query: &CallLogQuery) -> ProviderResult<Value> {
        debug!(
            "GET /calls/logs page={} page_size={}",
            query.page, query.page_size
        );

        let mut request = self.client.get(self.url("/calls/logs")).query(&[
            ("page", query.page.to_string()),
            ("page_size", query.page_size.to_string()),
        ]);
        if let Some(agent_id) = &query.agent_id {
            request = request.query(&[("agent_id", agent_id.as_str())]);
        }

        self.execute(request).await
    }

    async fn get_agent(&self, agent_id: &str) -> ProviderResult<Value> {
        debug!("GET /agents/{}", agent_id);
        self.execute(self.client.get(self.url(&format!("/agents/{}", agent_id))))
            .await
    }
}
