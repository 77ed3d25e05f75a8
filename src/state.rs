//! In-process service state: agent cache and call history
//!
//! Both stores live for the process lifetime only and are never persisted.
//! The mock provider holds clones of the same handles so its log/detail
//! responses reflect what the service actually did.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Mapping from agent identifier to the provider's agent payload.
/// An identifier returned by agent creation always resolves here for the
/// rest of the process lifetime.
#[derive(Clone)]
pub struct AgentCache {
    agents: Arc<RwLock<HashMap<String, Value>>>,
}

impl AgentCache {
    pub fn new() -> Self {
        Self {
            agents: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn insert(&self, agent_id: String, agent_data: Value) {
        let mut agents = self.agents.write().await;
        agents.insert(agent_id, agent_data);
    }

    pub async fn get(&self, agent_id: &str) -> Option<Value> {
        let agents = self.agents.read().await;
        agents.get(agent_id).cloned()
    }

    pub async fn len(&self) -> usize {
        let agents = self.agents.read().await;
        agents.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for AgentCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Append-only record of dispatched calls. Records are call payloads with a
/// `timestamp` field added; nothing is ever deduplicated or removed.
#[derive(Clone)]
pub struct CallHistory {
    calls: Arc<RwLock<Vec<Value>>>,
}

impl CallHistory {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn append(&self, record: Value) {
        let mut calls = self.calls.write().await;
        calls.push(record);
    }

    /// Most recent `limit` records, oldest first
    pub async fn tail(&self, limit: usize) -> Vec<Value> {
        let calls = self.calls.read().await;
        let start = calls.len().saturating_sub(limit);
        calls[start..].to_vec()
    }

    pub async fn len(&self) -> usize {
        let calls = self.calls.read().await;
        calls.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for CallHistory {
    fn default() -> Self {
        Self::new()
    }
}
