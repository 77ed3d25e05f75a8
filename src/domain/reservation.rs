//! Reservation request inputs and orchestration outcomes

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ErrorKind;

/// Restaurant being called
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantInfo {
    /// Restaurant name (required by the orchestrator)
    pub name: String,
    /// Restaurant phone number; when absent the configured fallback number
    /// is dialed instead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Requested reservation parameters. Every field is optional; the
/// orchestrator fills defaults (tomorrow, 7:00 PM, party of 2, no special
/// requests), but an entirely empty request is rejected as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationDetails {
    /// Requested date, free-form (e.g. "2025-06-23" or "Tomorrow")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Requested time, free-form (e.g. "7:30 PM")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Number of guests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_size: Option<u32>,
    /// Free-form requests relayed to the restaurant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

impl ReservationDetails {
    /// True when no field is set at all
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.time.is_none()
            && self.party_size.is_none()
            && self.special_requests.is_none()
    }
}

/// Customer the reservation is for
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Customer name (required by the orchestrator; lower-level operations
    /// fall back to a generic display name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact email relayed to the restaurant on request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone relayed to the restaurant on request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl CustomerInfo {
    /// Name used in agent scripts; generic placeholder when absent
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Customer")
    }

    /// Email used in agent scripts; placeholder when absent
    pub fn contact_email(&self) -> &str {
        self.email.as_deref().unwrap_or("customer@example.com")
    }
}

/// Result of one reservation orchestration. The orchestrator never raises;
/// every failure, validation included, comes back as `Failed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReservationOutcome {
    /// The call was placed and a status snapshot fetched
    Confirmed(ReservationConfirmation),
    /// Some step failed; carries the error kind and message
    Failed(ReservationFailure),
}

impl ReservationOutcome {
    /// True for the `Confirmed` variant
    pub fn is_confirmed(&self) -> bool {
        matches!(self, ReservationOutcome::Confirmed(_))
    }

    /// Confirmation payload, if confirmed
    pub fn confirmation(&self) -> Option<&ReservationConfirmation> {
        match self {
            ReservationOutcome::Confirmed(confirmation) => Some(confirmation),
            ReservationOutcome::Failed(_) => None,
        }
    }

    /// Failure payload, if failed
    pub fn failure(&self) -> Option<&ReservationFailure> {
        match self {
            ReservationOutcome::Confirmed(_) => None,
            ReservationOutcome::Failed(failure) => Some(failure),
        }
    }
}

/// Successful orchestration: identifiers, provider payloads, and the echoed
/// request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationConfirmation {
    /// Identifier of the agent that placed the call
    pub agent_id: String,
    /// Identifier of the dispatched call
    pub call_id: String,
    /// Provider's agent payload
    pub agent_data: Value,
    /// Provider's call payload
    pub call_data: Value,
    /// Status snapshot fetched right after dispatch
    pub call_status: Value,
    /// Completion timestamp (UTC, second precision)
    pub timestamp: String,
    /// Echoed restaurant name
    pub restaurant: String,
    /// Echoed customer name
    pub customer: String,
    /// Echoed reservation details
    pub reservation: ReservationDetails,
    /// Number actually dialed (restaurant's, or the fallback)
    pub target_phone: String,
}

/// Failed orchestration: error category and message plus the echoed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationFailure {
    /// Coarse category of the failing step's error
    pub kind: ErrorKind,
    /// Error message from the failing step
    pub error: String,
    /// Failure timestamp (UTC, second precision)
    pub timestamp: String,
    /// Echoed restaurant name as given (may be empty when that was the
    /// problem)
    pub restaurant: String,
    /// Echoed customer name as given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    /// Echoed reservation details
    pub reservation: ReservationDetails,
}
