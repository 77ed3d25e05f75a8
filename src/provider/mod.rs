//! Voice-agent provider implementations
//!
//! This module provides a unified interface for the voice-agent backend:
//! - OmniDimension (live HTTP API)
//! - Mock (locally synthesized responses, no network)
//!
//! The variant is selected explicitly at service construction; nothing is
//! inferred from the environment at call time.

mod mock;
mod omnidim;
mod response;

pub use mock::MockProvider;
pub use omnidim::OmniDimProvider;
pub use response::{extract_agent_id, extract_call_id, normalize};

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::config::{ProviderMode, ProviderSettings};
use crate::domain::{AgentBlueprint, CallContext, CallLogQuery};
use crate::error::{ProviderResult, ServiceError, ServiceResult};
use crate::state::{AgentCache, CallHistory};

/// Trait for voice-agent providers.
///
/// Responses are returned as raw `Value`s in whatever shape the backend
/// produced; callers normalize them (`response::normalize`) before reading
/// fields, because the live API is inconsistent about enveloping.
#[async_trait]
pub trait VoiceAgentProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Whether this provider fabricates responses locally instead of
    /// reaching an external API
    fn is_simulated(&self) -> bool {
        false
    }

    /// Create a calling agent from a blueprint
    async fn create_agent(&self, blueprint: &AgentBlueprint) -> ProviderResult<Value>;

    /// Dispatch an outbound call through an agent
    async fn dispatch_call(
        &self,
        agent_id: &str,
        to_number: &str,
        call_context: &CallContext,
    ) -> ProviderResult<Value>;

    /// Fetch the log/status of a single call
    async fn get_call_log(&self, call_id: &str) -> ProviderResult<Value>;

    /// List call logs, optionally scoped to one agent
    async fn list_call_logs(&self, query: &CallLogQuery) -> ProviderResult<Value>;

    /// Fetch an agent's details
    async fn get_agent(&self, agent_id: &str) -> ProviderResult<Value>;
}

/// Create a provider from configuration.
///
/// The mock provider is handed clones of the service's state handles so its
/// log and agent-detail responses reflect what the service actually did.
/// Live construction fails with a configuration error when no credential
/// can be resolved.
pub fn create_provider(
    settings: &ProviderSettings,
    agents: AgentCache,
    history: CallHistory,
) -> ServiceResult<Arc<dyn VoiceAgentProvider>> {
    match settings.mode {
        ProviderMode::Live => {
            let provider = OmniDimProvider::new(settings)
                .map_err(|e| ServiceError::Configuration(e.to_string()))?;
            Ok(Arc::new(provider))
        }
        ProviderMode::Mock => Ok(Arc::new(MockProvider::new(agents, history))),
    }
}
