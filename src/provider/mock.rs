//! Mock voice-agent provider
//!
//! Fabricates responses locally so the full reservation flow can run
//! without credentials or network access. Holds clones of the service's
//! state handles: the service records agents and calls as usual, and the
//! mock's log and agent-detail responses read that same state back.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::VoiceAgentProvider;
use crate::domain::{AgentBlueprint, CallContext, CallLogQuery};
use crate::error::ProviderResult;
use crate::state::{AgentCache, CallHistory};

/// Mock provider with locally synthesized responses
pub struct MockProvider {
    agents: AgentCache,
    history: CallHistory,
}

impl MockProvider {
    /// Create a new mock provider sharing the given state handles
    pub fn new(agents: AgentCache, history: CallHistory) -> Self {
        Self { agents, history }
    }

    fn mock_id(prefix: &str) -> String {
        format!("{}_{}", prefix, Utc::now().timestamp_millis())
    }
}

#[async_trait]
impl VoiceAgentProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn is_simulated(&self) -> bool {
        true
    }

    async fn create_agent(&self, blueprint: &AgentBlueprint) -> ProviderResult<Value> {
        let agent_id = Self::mock_id("mock_agent");
        info!("Mock provider created agent {}", agent_id);

        Ok(json!({
            "id": agent_id,
            "name": blueprint.name,
        }))
    }

    async fn dispatch_call(
        &self,
        agent_id: &str,
        to_number: &str,
        _call_context: &CallContext,
    ) -> ProviderResult<Value> {
        let call_id = Self::mock_id("mock_call");
        info!("Mock provider dispatched call {} to {}", call_id, to_number);

        Ok(json!({
            "id": call_id,
            "status": "mock_initiated",
            "agent_id": agent_id,
            "phone_number": to_number,
        }))
    }

    async fn get_call_log(&self, call_id: &str) -> ProviderResult<Value> {
        debug!("Mock provider serving call log for {}", call_id);

        Ok(json!({
            "id": call_id,
            "status": "mock_completed",
            "summary": "Mock reservation confirmed successfully.",
            "duration": 45,
            "transcript": "Mock conversation transcript",
        }))
    }

    /// Serves the trailing `page_size` records of the shared call history.
    /// The page number is echoed in the pagination summary but never used
    /// as an offset, and the agent filter is not applied.
    async fn list_call_logs(&self, query: &CallLogQuery) -> ProviderResult<Value> {
        let total = self.history.len().await;
        let data = self.history.tail(query.page_size as usize).await;
        debug!(
            "Mock provider serving {} of {} call log records",
            data.len(),
            total
        );

        Ok(json!({
            "data": data,
            "pagination": {
                "page": query.page,
                "page_size": query.page_size,
                "total": total,
            },
        }))
    }

    async fn get_agent(&self, agent_id: &str) -> ProviderResult<Value> {
        debug!("Mock provider serving agent details for {}", agent_id);

        match self.agents.get(agent_id).await {
            Some(details) => Ok(details),
            None => Ok(json!({
                "id": agent_id,
                "status": "mock",
            })),
        }
    }
}
