//! Agent blueprint sent to the voice-agent provider

use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// Call direction the provider expects for outbound dialing
pub const CALL_TYPE_OUTGOING: &str = "Outgoing";
/// Voice synthesis backend used for reservation calls
pub const VOICE_PROVIDER: &str = "eleven_labs";
/// Provider-side voice identifier used for reservation calls
pub const VOICE_EXTERNAL_ID: &str = "JBFqnCBsd6RMkjVDRZzb";
/// Language model driving the agent
pub const LLM_SERVICE: &str = "gpt-4o-mini";
/// Prompt-driven bot, as opposed to a flow-graph bot
pub const BOT_TYPE: &str = "prompt";

/// One titled section of the agent's conversation context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextSection {
    /// Section title shown to the provider
    pub title: String,
    /// Section body text
    pub body: String,
}

/// Agent configuration in the provider's wire shape.
///
/// Field names serialize to the provider's exact field names, including the
/// provider's own spelling of `llm_straming_enabled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentBlueprint {
    /// Display name of the calling persona
    pub name: String,
    /// Opening line the agent speaks when the call connects
    pub welcome_message: String,
    /// Ordered context sections the agent is briefed with
    pub context_breakdown: Vec<ContextSection>,
    /// Call direction ("Outgoing" for dispatched calls)
    pub call_type: String,
    /// Voice synthesis backend
    pub voice_provider: String,
    /// Voice identifier at the synthesis backend
    pub voice_external_id: String,
    /// Language model identifier
    pub llm_service: String,
    /// Bot flavor ("prompt")
    pub bot_type: String,
    /// Languages the agent speaks
    pub language: Vec<String>,
    /// Whether filler speech ("um", "let me check") is enabled
    pub is_filler_enable: bool,
    /// Seconds of silence before filler speech kicks in
    pub filler_after_sec: f64,
    /// Whether the provider streams model output into speech
    #[serde(rename = "llm_straming_enabled")]
    pub llm_streaming_enabled: bool,
    /// Whether the agent may search the web mid-call
    pub enable_web_search: bool,
}

impl AgentBlueprint {
    /// Build the fixed-shape reservation-call persona for a restaurant and
    /// customer. Everything except the interpolated names is constant for
    /// this crate's use case: outgoing call, English only, filler speech,
    /// streaming and web search disabled.
    pub fn for_reservation(restaurant_name: &str, customer_name: &str, customer_email: &str) -> Self {
        Self {
            name: format!("{} - Booking Assistant for {}", restaurant_name, customer_name),
            welcome_message: format!(
                "Hello! This is {} calling to make a reservation at {}. \
                 Could you please help me with booking a table?",
                customer_name, restaurant_name
            ),
            context_breakdown: vec![
                ContextSection {
                    title: "Reservation Request".to_string(),
                    body: format!(
                        "I am {} and I would like to make a reservation at {}. \
                         I will provide the date, time, number of guests, and any special requests. \
                         Please be polite and professional when speaking with the restaurant staff.",
                        customer_name, restaurant_name
                    ),
                },
                ContextSection {
                    title: "Customer Information".to_string(),
                    body: format!(
                        "Customer Name: {}, Email: {}. \
                         Please provide this information if the restaurant asks for contact details.",
                        customer_name, customer_email
                    ),
                },
                ContextSection {
                    title: "Conversation Flow".to_string(),
                    body: "1. Greet the restaurant politely \
                           2. Request to make a reservation \
                           3. Provide all reservation details clearly \
                           4. Confirm the booking details \
                           5. Ask for confirmation number if available \
                           6. Thank them and end the call politely"
                        .to_string(),
                },
            ],
            call_type: CALL_TYPE_OUTGOING.to_string(),
            voice_provider: VOICE_PROVIDER.to_string(),
            voice_external_id: VOICE_EXTERNAL_ID.to_string(),
            llm_service: LLM_SERVICE.to_string(),
            bot_type: BOT_TYPE.to_string(),
            language: vec!["en".to_string()],
            is_filler_enable: false,
            filler_after_sec: 0.0,
            llm_streaming_enabled: false,
            enable_web_search: false,
        }
    }

    /// Check the fields the provider rejects requests without, reporting the
    /// first missing one. Side-effect-free.
    pub fn validate(&self) -> ServiceResult<()> {
        let required = [
            ("name", &self.name),
            ("welcome_message", &self.welcome_message),
            ("call_type", &self.call_type),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(ServiceError::Validation(format!(
                    "Agent configuration missing required field: {}",
                    field
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_reservation_interpolates_names() {
        let blueprint = AgentBlueprint::for_reservation(
            "Spice Garden",
            "Ayush Kumar",
            "ayush.kumar@example.com",
        );
        assert_eq!(blueprint.name, "Spice Garden - Booking Assistant for Ayush Kumar");
        assert!(blueprint.welcome_message.contains("Ayush Kumar"));
        assert!(blueprint.welcome_message.contains("Spice Garden"));
        assert_eq!(blueprint.context_breakdown.len(), 3);
        assert_eq!(blueprint.context_breakdown[0].title, "Reservation Request");
        assert_eq!(blueprint.context_breakdown[1].title, "Customer Information");
        assert!(blueprint.context_breakdown[1].body.contains("ayush.kumar@example.com"));
        assert_eq!(blueprint.context_breakdown[2].title, "Conversation Flow");
    }

    #[test]
    fn for_reservation_uses_fixed_call_settings() {
        let blueprint = AgentBlueprint::for_reservation("Spice Garden", "Customer", "c@example.com");
        assert_eq!(blueprint.call_type, "Outgoing");
        assert_eq!(blueprint.voice_provider, "eleven_labs");
        assert_eq!(blueprint.llm_service, "gpt-4o-mini");
        assert_eq!(blueprint.language, vec!["en".to_string()]);
        assert!(!blueprint.is_filler_enable);
        assert!(!blueprint.llm_streaming_enabled);
        assert!(!blueprint.enable_web_search);
    }

    #[test]
    fn serializes_provider_wire_names() {
        let blueprint = AgentBlueprint::for_reservation("Spice Garden", "Customer", "c@example.com");
        let wire = serde_json::to_value(&blueprint).unwrap();
        // The provider's field name for streaming is spelled this way.
        assert!(wire.get("llm_straming_enabled").is_some());
        assert!(wire.get("llm_streaming_enabled").is_none());
        assert_eq!(wire["call_type"], "Outgoing");
    }

    #[test]
    fn validate_reports_first_missing_field() {
        let mut blueprint = AgentBlueprint::for_reservation("Spice Garden", "Customer", "c@example.com");
        blueprint.name.clear();
        blueprint.call_type.clear();
        let err = blueprint.validate().unwrap_err();
        assert!(err.to_string().contains("missing required field: name"));

        let mut blueprint = AgentBlueprint::for_reservation("Spice Garden", "Customer", "c@example.com");
        blueprint.call_type.clear();
        let err = blueprint.validate().unwrap_err();
        assert!(err.to_string().contains("missing required field: call_type"));
    }

    #[test]
    fn validate_accepts_complete_blueprint() {
        let blueprint = AgentBlueprint::for_reservation("Spice Garden", "Customer", "c@example.com");
        assert!(blueprint.validate().is_ok());
    }
}
