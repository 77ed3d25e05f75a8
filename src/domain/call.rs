//! Call-side domain types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form key-value payload describing a dispatched call's intent
/// (reservation date, party size, and so on). The provider treats it as
/// opaque context for the conversation.
pub type CallContext = serde_json::Map<String, Value>;

/// Query parameters for listing call logs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallLogQuery {
    /// Restrict to calls placed by this agent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u32,
    /// Entries per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    30
}

impl Default for CallLogQuery {
    fn default() -> Self {
        Self {
            agent_id: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl CallLogQuery {
    /// Query scoped to one agent's calls
    pub fn for_agent(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: Some(agent_id.into()),
            ..Self::default()
        }
    }

    /// Override the page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Result of probing the provider API. Produced by
/// `ReservationService::test_api_connection`, which never fails: probe
/// errors are folded into an `Error` report instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionReport {
    /// Probe outcome
    pub status: ConnectionStatus,
    /// Whether the provider API answered
    pub api_accessible: bool,
    /// Raw probe response when the API answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    /// Probe failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Probe outcome states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    /// Simulated provider; no API to reach
    MockMode,
    /// Probe succeeded
    Connected,
    /// Probe failed
    Error,
}

impl ConnectionReport {
    /// Report for a simulated provider
    pub fn mock_mode() -> Self {
        Self {
            status: ConnectionStatus::MockMode,
            api_accessible: false,
            response: None,
            error: None,
        }
    }

    /// Report for a successful probe, carrying the raw response
    pub fn connected(response: Value) -> Self {
        Self {
            status: ConnectionStatus::Connected,
            api_accessible: true,
            response: Some(response),
            error: None,
        }
    }

    /// Report for a failed probe
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ConnectionStatus::Error,
            api_accessible: false,
            response: None,
            error: Some(message.into()),
        }
    }
}
