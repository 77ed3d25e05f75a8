//! Reservation service: agent creation, call dispatch, status reads, and
//! the end-to-end booking orchestration.
//!
//! Validation failures surface before any provider traffic; provider calls
//! go through the retry policy; only the orchestrator folds errors into a
//! `ReservationOutcome` instead of propagating them.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::domain::{
    validate_phone, AgentBlueprint, CallContext, CallLogQuery, ConnectionReport, CustomerInfo,
    ReservationConfirmation, ReservationDetails, ReservationFailure, ReservationOutcome,
    RestaurantInfo,
};
use crate::error::{ServiceError, ServiceResult};
use crate::provider::{create_provider, extract_agent_id, extract_call_id, normalize, VoiceAgentProvider};
use crate::retry::{retry_call, RetryPolicy};
use crate::state::{AgentCache, CallHistory};

/// Orchestrates voice-agent reservation calls against a provider.
///
/// Cheap to clone; clones share the agent cache and call history.
#[derive(Clone)]
pub struct ReservationService {
    provider: Arc<dyn VoiceAgentProvider>,
    agents: AgentCache,
    history: CallHistory,
    retry: RetryPolicy,
    fallback_phone: String,
}

impl ReservationService {
    /// Build a service from settings.
    ///
    /// Fails with a configuration error when the live provider is selected
    /// and no credential can be resolved.
    pub fn new(settings: Settings) -> ServiceResult<Self> {
        let agents = AgentCache::new();
        let history = CallHistory::new();
        let provider = create_provider(&settings.provider, agents.clone(), history.clone())?;

        info!("Reservation service using {} provider", provider.name());

        Ok(Self {
            provider,
            agents,
            history,
            retry: settings.retry.policy(),
            fallback_phone: settings.dispatch.fallback_phone,
        })
    }

    /// Build a service around an existing provider handle. State starts
    /// empty; this is the seam for bringing a custom provider.
    pub fn with_provider(
        provider: Arc<dyn VoiceAgentProvider>,
        retry: RetryPolicy,
        fallback_phone: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            agents: AgentCache::new(),
            history: CallHistory::new(),
            retry,
            fallback_phone: fallback_phone.into(),
        }
    }

    /// Handle to the agent cache (shared with clones of this service)
    pub fn agent_cache(&self) -> AgentCache {
        self.agents.clone()
    }

    /// Handle to the dispatched-call history (shared with clones)
    pub fn call_history(&self) -> CallHistory {
        self.history.clone()
    }

    /// Create a booking agent for a restaurant and cache its details.
    ///
    /// Returns the agent id together with the provider's normalized agent
    /// payload.
    pub async fn create_restaurant_agent(
        &self,
        restaurant_name: &str,
        customer: &CustomerInfo,
    ) -> ServiceResult<(String, Value)> {
        if restaurant_name.is_empty() {
            return Err(ServiceError::Validation(
                "Restaurant name is required".to_string(),
            ));
        }

        let blueprint = AgentBlueprint::for_reservation(
            restaurant_name,
            customer.display_name(),
            customer.contact_email(),
        );
        blueprint.validate()?;

        info!("Creating booking agent for {}", restaurant_name);
        debug!(
            "Agent blueprint: {}",
            serde_json::to_string(&blueprint).unwrap_or_default()
        );

        let response = retry_call(&self.retry, "create agent", || {
            self.provider.create_agent(&blueprint)
        })
        .await?;

        let agent_data = normalize(response);
        let agent_id = extract_agent_id(&agent_data).ok_or_else(|| {
            ServiceError::Data(format!(
                "Agent creation response has no id field: {}",
                agent_data
            ))
        })?;

        info!("Agent created successfully: {}", agent_id);
        self.agents.insert(agent_id.clone(), agent_data.clone()).await;

        Ok((agent_id, agent_data))
    }

    /// Dispatch a call through an agent.
    ///
    /// Falls back to the configured number when no target is given; the
    /// resolved number must look like a phone number before anything is
    /// dispatched or recorded. Returns the call id and the normalized call
    /// payload, and appends a timestamped record to the call history.
    pub async fn make_call(
        &self,
        agent_id: &str,
        phone_number: Option<&str>,
        call_context: Option<CallContext>,
    ) -> ServiceResult<(String, Value)> {
        if agent_id.is_empty() {
            return Err(ServiceError::Validation("Agent ID is required".to_string()));
        }

        let phone = phone_number.unwrap_or(&self.fallback_phone);
        if !validate_phone(phone) {
            return Err(ServiceError::Validation(format!(
                "Invalid phone number: {}",
                phone
            )));
        }

        let call_context = call_context.unwrap_or_default();

        if !self.provider.is_simulated() {
            self.verify_agent_ready(agent_id).await;
        }

        info!("Dispatching call to {} using agent {}", phone, agent_id);
        let response = retry_call(&self.retry, "dispatch call", || {
            self.provider.dispatch_call(agent_id, phone, &call_context)
        })
        .await?;

        let call_data = normalize(response);
        let call_id = extract_call_id(&call_data).ok_or_else(|| {
            ServiceError::Data(format!(
                "Call dispatch response has no id field: {}",
                call_data
            ))
        })?;

        info!("Call dispatched successfully: {}", call_id);

        let mut record = call_data.clone();
        if let Value::Object(map) = &mut record {
            map.insert("timestamp".to_string(), json!(now_utc()));
        }
        self.history.append(record).await;

        Ok((call_id, call_data))
    }

    /// Fetch the status/log of a dispatched call
    pub async fn get_call_status(&self, call_id: &str) -> ServiceResult<Value> {
        if call_id.is_empty() {
            return Err(ServiceError::Validation("Call ID is required".to_string()));
        }

        let response = retry_call(&self.retry, "get call log", || {
            self.provider.get_call_log(call_id)
        })
        .await?;

        Ok(normalize(response))
    }

    /// List call logs, optionally restricted to one agent
    pub async fn get_call_logs(&self, query: CallLogQuery) -> ServiceResult<Value> {
        let response = retry_call(&self.retry, "list call logs", || {
            self.provider.list_call_logs(&query)
        })
        .await?;

        Ok(normalize(response))
    }

    /// Fetch an agent's details. Single attempt; callers treating this as
    /// advisory handle the error themselves.
    pub async fn get_agent_details(&self, agent_id: &str) -> ServiceResult<Value> {
        if agent_id.is_empty() {
            return Err(ServiceError::Validation("Agent ID is required".to_string()));
        }

        match self.provider.get_agent(agent_id).await {
            Ok(response) => Ok(normalize(response)),
            Err(err) => {
                warn!("Error getting agent details for {}: {}", agent_id, err);
                Err(err.into())
            }
        }
    }

    /// Probe the provider API. Never fails: a simulated provider reports
    /// `mock_mode`, probe errors come back as an error report.
    pub async fn test_api_connection(&self) -> ConnectionReport {
        if self.provider.is_simulated() {
            return ConnectionReport::mock_mode();
        }

        let probe = CallLogQuery::default().with_page_size(1);
        match retry_call(&self.retry, "connection probe", || {
            self.provider.list_call_logs(&probe)
        })
        .await
        {
            Ok(response) => ConnectionReport::connected(response),
            Err(err) => {
                warn!("API connection test failed: {}", err);
                ConnectionReport::error(err.to_string())
            }
        }
    }

    /// Run the whole reservation flow: create an agent, dispatch the call,
    /// fetch an initial status snapshot.
    ///
    /// Never returns an error; every failure is folded into
    /// `ReservationOutcome::Failed` with its category and message.
    pub async fn make_restaurant_reservation(
        &self,
        restaurant: RestaurantInfo,
        reservation: ReservationDetails,
        customer: CustomerInfo,
    ) -> ReservationOutcome {
        if let Err(err) = validate_reservation_request(&restaurant, &reservation, &customer) {
            warn!("Reservation request rejected: {}", err);
            return self.failed_outcome(err, &restaurant, &reservation, &customer);
        }

        info!("Starting reservation process for {}", restaurant.name);
        match self.run_reservation(&restaurant, &reservation, &customer).await {
            Ok(confirmation) => {
                info!(
                    "Reservation call {} placed for {}",
                    confirmation.call_id, confirmation.restaurant
                );
                ReservationOutcome::Confirmed(confirmation)
            }
            Err(err) => {
                warn!("Reservation process failed: {}", err);
                self.failed_outcome(err, &restaurant, &reservation, &customer)
            }
        }
    }

    async fn run_reservation(
        &self,
        restaurant: &RestaurantInfo,
        reservation: &ReservationDetails,
        customer: &CustomerInfo,
    ) -> ServiceResult<ReservationConfirmation> {
        let (agent_id, agent_data) = self
            .create_restaurant_agent(&restaurant.name, customer)
            .await?;

        let call_context = build_call_context(restaurant, reservation, customer);
        let target_phone = restaurant
            .phone
            .clone()
            .unwrap_or_else(|| self.fallback_phone.clone());

        let (call_id, call_data) = self
            .make_call(&agent_id, Some(&target_phone), Some(call_context))
            .await?;

        let call_status = self.get_call_status(&call_id).await?;

        Ok(ReservationConfirmation {
            agent_id,
            call_id,
            agent_data,
            call_data,
            call_status,
            timestamp: now_utc(),
            restaurant: restaurant.name.clone(),
            customer: customer.name.clone().unwrap_or_default(),
            reservation: reservation.clone(),
            target_phone,
        })
    }

    fn failed_outcome(
        &self,
        err: ServiceError,
        restaurant: &RestaurantInfo,
        reservation: &ReservationDetails,
        customer: &CustomerInfo,
    ) -> ReservationOutcome {
        ReservationOutcome::Failed(ReservationFailure {
            kind: err.kind(),
            error: err.message(),
            timestamp: now_utc(),
            restaurant: restaurant.name.clone(),
            customer: customer.name.clone(),
            reservation: reservation.clone(),
        })
    }

    /// Pre-flight check before a live dispatch. Advisory only: a missing
    /// voice binding or a failed lookup is logged and dispatch proceeds.
    async fn verify_agent_ready(&self, agent_id: &str) {
        match self.get_agent_details(agent_id).await {
            Ok(agent_data) => {
                let voice_bound = agent_data
                    .get("voice_external_id")
                    .and_then(Value::as_str)
                    .is_some_and(|id| !id.is_empty());
                if voice_bound {
                    debug!("Agent {} verified and ready for calls", agent_id);
                } else {
                    warn!(
                        "Agent {} may not have proper voice configuration",
                        agent_id
                    );
                }
            }
            Err(err) => {
                warn!("Could not verify agent {}: {}", agent_id, err);
            }
        }
    }
}

fn validate_reservation_request(
    restaurant: &RestaurantInfo,
    reservation: &ReservationDetails,
    customer: &CustomerInfo,
) -> ServiceResult<()> {
    if restaurant.name.is_empty() {
        return Err(ServiceError::Validation(
            "Restaurant info with name is required".to_string(),
        ));
    }
    if customer.name.as_deref().map_or(true, str::is_empty) {
        return Err(ServiceError::Validation(
            "Customer info with name is required".to_string(),
        ));
    }
    if reservation.is_empty() {
        return Err(ServiceError::Validation(
            "Reservation details are required".to_string(),
        ));
    }
    if let Some(phone) = &restaurant.phone {
        if !validate_phone(phone) {
            return Err(ServiceError::Validation(format!(
                "Invalid restaurant phone number: {}",
                phone
            )));
        }
    }
    Ok(())
}

/// Conversation context handed to the agent for one reservation call.
/// Unset details get speakable defaults; the guest count is stringified
/// the way the provider expects.
fn build_call_context(
    restaurant: &RestaurantInfo,
    reservation: &ReservationDetails,
    customer: &CustomerInfo,
) -> CallContext {
    let mut context = CallContext::new();
    context.insert(
        "reservation_date".to_string(),
        json!(reservation.date.clone().unwrap_or_else(tomorrow)),
    );
    context.insert(
        "reservation_time".to_string(),
        json!(reservation.time.as_deref().unwrap_or("7:00 PM")),
    );
    context.insert(
        "number_of_guests".to_string(),
        json!(reservation.party_size.unwrap_or(2).to_string()),
    );
    context.insert(
        "special_requests".to_string(),
        json!(reservation.special_requests.as_deref().unwrap_or("")),
    );
    context.insert(
        "customer_name".to_string(),
        json!(customer.name.as_deref().unwrap_or("")),
    );
    context.insert(
        "customer_phone".to_string(),
        json!(customer.phone.as_deref().unwrap_or("")),
    );
    context.insert(
        "customer_email".to_string(),
        json!(customer.email.as_deref().unwrap_or("")),
    );
    context.insert("restaurant_name".to_string(), json!(restaurant.name));
    context.insert("booking_type".to_string(), json!("reservation"));
    context.insert("urgency".to_string(), json!("normal"));
    context
}

fn now_utc() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn tomorrow() -> String {
    (Utc::now() + Duration::days(1)).format("%B %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionStatus;
    use crate::error::{ErrorKind, ProviderError, ProviderResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration as StdDuration;

    /// Provider stub that fails every operation, counting invocations
    struct FailingProvider {
        calls: AtomicU32,
    }

    impl FailingProvider {
        fn new() -> Self {
            Self {
                calls: AtomicU32::new(0),
            }
        }

        fn fail(&self) -> ProviderError {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ProviderError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            }
        }
    }

    #[async_trait]
    impl VoiceAgentProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        // simulated so dispatch skips the pre-flight agent lookup
        fn is_simulated(&self) -> bool {
            true
        }

        async fn create_agent(&self, _blueprint: &AgentBlueprint) -> ProviderResult<Value> {
            Err(self.fail())
        }

        async fn dispatch_call(
            &self,
            _agent_id: &str,
            _to_number: &str,
            _call_context: &CallContext,
        ) -> ProviderResult<Value> {
            Err(self.fail())
        }

        async fn get_call_log(&self, _call_id: &str) -> ProviderResult<Value> {
            Err(self.fail())
        }

        async fn list_call_logs(&self, _query: &CallLogQuery) -> ProviderResult<Value> {
            Err(self.fail())
        }

        async fn get_agent(&self, _agent_id: &str) -> ProviderResult<Value> {
            Err(self.fail())
        }
    }

    /// Provider stub that returns a fixed payload from every operation
    struct CannedProvider {
        payload: Value,
    }

    #[async_trait]
    impl VoiceAgentProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        fn is_simulated(&self) -> bool {
            true
        }

        async fn create_agent(&self, _blueprint: &AgentBlueprint) -> ProviderResult<Value> {
            Ok(self.payload.clone())
        }

        async fn dispatch_call(
            &self,
            _agent_id: &str,
            _to_number: &str,
            _call_context: &CallContext,
        ) -> ProviderResult<Value> {
            Ok(self.payload.clone())
        }

        async fn get_call_log(&self, _call_id: &str) -> ProviderResult<Value> {
            Ok(self.payload.clone())
        }

        async fn list_call_logs(&self, _query: &CallLogQuery) -> ProviderResult<Value> {
            Ok(self.payload.clone())
        }

        async fn get_agent(&self, _agent_id: &str) -> ProviderResult<Value> {
            Ok(self.payload.clone())
        }
    }

    /// Provider stub acting like a live backend with a broken read side:
    /// agent lookups and log listings fail while dispatch succeeds. Keeps
    /// the default `is_simulated`, so the live-only paths run.
    struct DegradedLiveProvider {
        agent_lookups: AtomicU32,
    }

    impl DegradedLiveProvider {
        fn new() -> Self {
            Self {
                agent_lookups: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl VoiceAgentProvider for DegradedLiveProvider {
        fn name(&self) -> &str {
            "degraded"
        }

        async fn create_agent(&self, _blueprint: &AgentBlueprint) -> ProviderResult<Value> {
            Ok(json!({"id": "agent_live_1"}))
        }

        async fn dispatch_call(
            &self,
            _agent_id: &str,
            to_number: &str,
            _call_context: &CallContext,
        ) -> ProviderResult<Value> {
            Ok(json!({"id": "call_live_1", "status": "queued", "phone_number": to_number}))
        }

        async fn get_call_log(&self, call_id: &str) -> ProviderResult<Value> {
            Ok(json!({"id": call_id, "status": "completed"}))
        }

        async fn list_call_logs(&self, _query: &CallLogQuery) -> ProviderResult<Value> {
            Err(ProviderError::Network("api offline".to_string()))
        }

        async fn get_agent(&self, _agent_id: &str) -> ProviderResult<Value> {
            self.agent_lookups.fetch_add(1, Ordering::SeqCst);
            Err(ProviderError::Api {
                status: 404,
                message: "agent not found".to_string(),
            })
        }
    }

    fn failing_service() -> (ReservationService, Arc<FailingProvider>) {
        let provider = Arc::new(FailingProvider::new());
        let service = ReservationService::with_provider(
            provider.clone(),
            RetryPolicy::new(3, StdDuration::from_millis(100)),
            "+919548999129",
        );
        (service, provider)
    }

    fn canned_service(payload: Value) -> ReservationService {
        ReservationService::with_provider(
            Arc::new(CannedProvider { payload }),
            RetryPolicy::new(1, StdDuration::from_millis(1)),
            "+919548999129",
        )
    }

    fn sample_customer() -> CustomerInfo {
        CustomerInfo {
            name: Some("Ayush Kumar".to_string()),
            email: Some("ayush.kumar@example.com".to_string()),
            phone: Some("+919876543211".to_string()),
        }
    }

    #[tokio::test]
    async fn create_agent_rejects_empty_restaurant_before_any_provider_call() {
        let (service, provider) = failing_service();

        let err = service
            .create_restaurant_agent("", &sample_customer())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("Restaurant name is required"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert!(service.agent_cache().is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn provider_failures_exhaust_all_attempts_then_propagate() {
        let (service, provider) = failing_service();

        let err = service
            .create_restaurant_agent("Spice Garden", &sample_customer())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ExternalCall);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
        assert!(service.agent_cache().is_empty().await);
    }

    #[tokio::test]
    async fn make_call_rejects_empty_agent_id() {
        let (service, provider) = failing_service();

        let err = service.make_call("", None, None).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("Agent ID is required"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn make_call_rejects_bad_phone_without_recording_history() {
        let (service, provider) = failing_service();

        let err = service
            .make_call("agent_1", Some("12345"), None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("Invalid phone number: 12345"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert!(service.call_history().is_empty().await);
    }

    #[tokio::test]
    async fn get_call_status_requires_call_id() {
        let (service, _) = failing_service();
        let err = service.get_call_status("").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn response_without_id_is_a_data_error() {
        let service = canned_service(json!({"name": "no id here"}));

        let err = service
            .create_restaurant_agent("Spice Garden", &sample_customer())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Data);
        assert!(service.agent_cache().is_empty().await);
    }

    #[tokio::test]
    async fn enveloped_response_is_unwrapped_before_id_extraction() {
        let service = canned_service(json!({"json": {"id": "agent_77"}}));

        let (agent_id, agent_data) = service
            .create_restaurant_agent("Spice Garden", &sample_customer())
            .await
            .unwrap();

        assert_eq!(agent_id, "agent_77");
        assert_eq!(agent_data, json!({"id": "agent_77"}));
        assert_eq!(
            service.agent_cache().get("agent_77").await,
            Some(json!({"id": "agent_77"}))
        );
    }

    #[tokio::test]
    async fn call_history_record_carries_timestamp() {
        let service = canned_service(json!({"id": "call_9", "status": "queued"}));

        let (call_id, _) = service
            .make_call("agent_1", Some("+919876543210"), None)
            .await
            .unwrap();

        assert_eq!(call_id, "call_9");
        let records = service.call_history().tail(10).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], "call_9");
        assert!(records[0]["timestamp"].is_string());
    }

    #[tokio::test]
    async fn failed_agent_lookup_does_not_block_live_dispatch() {
        let provider = Arc::new(DegradedLiveProvider::new());
        let service = ReservationService::with_provider(
            provider.clone(),
            RetryPolicy::new(1, StdDuration::from_millis(1)),
            "+919548999129",
        );

        let (call_id, _) = service
            .make_call("agent_live_1", Some("+919876543210"), None)
            .await
            .unwrap();

        // the pre-flight lookup ran, failed, and dispatch went ahead anyway
        assert_eq!(provider.agent_lookups.load(Ordering::SeqCst), 1);
        assert_eq!(call_id, "call_live_1");
        let records = service.call_history().tail(10).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], "call_live_1");
    }

    #[tokio::test]
    async fn connection_test_reports_live_failure_without_raising() {
        let service = ReservationService::with_provider(
            Arc::new(DegradedLiveProvider::new()),
            RetryPolicy::new(2, StdDuration::from_millis(1)),
            "+919548999129",
        );

        let report = service.test_api_connection().await;

        assert_eq!(report.status, ConnectionStatus::Error);
        assert!(!report.api_accessible);
        assert!(report.response.is_none());
        assert!(report.error.unwrap().contains("api offline"));
    }

    #[tokio::test(start_paused = true)]
    async fn orchestrator_folds_provider_failure_into_outcome() {
        let (service, provider) = failing_service();

        let outcome = service
            .make_restaurant_reservation(
                RestaurantInfo {
                    name: "Spice Garden".to_string(),
                    phone: Some("+919876543210".to_string()),
                },
                ReservationDetails {
                    time: Some("7:30 PM".to_string()),
                    ..Default::default()
                },
                sample_customer(),
            )
            .await;

        let failure = outcome.failure().expect("expected a failed outcome");
        assert_eq!(failure.kind, ErrorKind::ExternalCall);
        assert!(failure.error.contains("503"));
        assert_eq!(failure.restaurant, "Spice Garden");
        // agent creation fails first, so exactly max_attempts calls were made
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn orchestrator_validates_before_touching_the_provider() {
        let (service, provider) = failing_service();

        let cases: Vec<(RestaurantInfo, ReservationDetails, CustomerInfo, &str)> = vec![
            (
                RestaurantInfo::default(),
                ReservationDetails {
                    time: Some("7:30 PM".to_string()),
                    ..Default::default()
                },
                sample_customer(),
                "Restaurant info with name is required",
            ),
            (
                RestaurantInfo {
                    name: "Spice Garden".to_string(),
                    phone: None,
                },
                ReservationDetails {
                    time: Some("7:30 PM".to_string()),
                    ..Default::default()
                },
                CustomerInfo::default(),
                "Customer info with name is required",
            ),
            (
                RestaurantInfo {
                    name: "Spice Garden".to_string(),
                    phone: None,
                },
                ReservationDetails::default(),
                sample_customer(),
                "Reservation details are required",
            ),
            (
                RestaurantInfo {
                    name: "Spice Garden".to_string(),
                    phone: Some("123".to_string()),
                },
                ReservationDetails {
                    time: Some("7:30 PM".to_string()),
                    ..Default::default()
                },
                sample_customer(),
                "Invalid restaurant phone number: 123",
            ),
        ];

        for (restaurant, reservation, customer, expected) in cases {
            let outcome = service
                .make_restaurant_reservation(restaurant, reservation, customer)
                .await;
            let failure = outcome.failure().expect("expected a failed outcome");
            assert_eq!(failure.kind, ErrorKind::Validation);
            assert_eq!(failure.error, expected);
        }

        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert!(service.agent_cache().is_empty().await);
        assert!(service.call_history().is_empty().await);
    }

    #[test]
    fn call_context_defaults_fill_unset_details() {
        let restaurant = RestaurantInfo {
            name: "Spice Garden".to_string(),
            phone: None,
        };
        let customer = sample_customer();

        let context = build_call_context(&restaurant, &ReservationDetails::default(), &customer);

        assert_eq!(context["reservation_time"], "7:00 PM");
        assert_eq!(context["number_of_guests"], "2");
        assert_eq!(context["special_requests"], "");
        assert_eq!(context["restaurant_name"], "Spice Garden");
        assert_eq!(context["booking_type"], "reservation");
        assert_eq!(context["urgency"], "normal");
        // default date is tomorrow, spelled out ("June 23, 2025" style)
        let date = context["reservation_date"].as_str().unwrap();
        assert!(date.contains(", "));
        assert!(!date.is_empty());
    }

    #[test]
    fn call_context_keeps_explicit_details() {
        let restaurant = RestaurantInfo {
            name: "Spice Garden".to_string(),
            phone: None,
        };
        let reservation = ReservationDetails {
            date: Some("2025-06-23".to_string()),
            time: Some("7:30 PM".to_string()),
            party_size: Some(4),
            special_requests: Some("Window seat preferred".to_string()),
        };

        let context = build_call_context(&restaurant, &reservation, &sample_customer());

        assert_eq!(context["reservation_date"], "2025-06-23");
        assert_eq!(context["reservation_time"], "7:30 PM");
        assert_eq!(context["number_of_guests"], "4");
        assert_eq!(context["special_requests"], "Window seat preferred");
        assert_eq!(context["customer_name"], "Ayush Kumar");
        assert_eq!(context["customer_phone"], "+919876543211");
        assert_eq!(context["customer_email"], "ayush.kumar@example.com");
    }
}
