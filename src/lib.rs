//! # Concierge - Restaurant Reservation Caller
//!
//! Concierge dispatches AI voice agents that phone restaurants and book
//! tables. It wraps the OmniDimension voice-agent API with typed inputs,
//! retry handling, and a mock mode that runs the whole flow offline.
//!
//! ## Features
//!
//! - **End-to-end orchestration**: create agent, dispatch call, fetch status
//! - **Mock mode**: full reservation flow with no credentials or network
//! - **Retry with exponential backoff**: transient API failures are retried
//! - **Response normalization**: enveloped and flat API payloads read the same
//! - **Typed outcomes**: confirmations and failures as data, not exceptions
//! - **Configurable**: TOML config file, CLI flags, and environment variables
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use concierge::config::{ProviderMode, Settings};
//! use concierge::domain::{CustomerInfo, ReservationDetails, RestaurantInfo};
//! use concierge::service::ReservationService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut settings = Settings::default();
//!     settings.provider.mode = ProviderMode::Mock;
//!
//!     let service = ReservationService::new(settings)?;
//!     let outcome = service
//!         .make_restaurant_reservation(
//!             RestaurantInfo {
//!                 name: "Spice Garden".to_string(),
//!                 phone: Some("+919876543210".to_string()),
//!             },
//!             ReservationDetails {
//!                 time: Some("7:30 PM".to_string()),
//!                 ..Default::default()
//!             },
//!             CustomerInfo {
//!                 name: Some("Ayush Kumar".to_string()),
//!                 ..Default::default()
//!             },
//!         )
//!         .await;
//!
//!     println!("{}", serde_json::to_string_pretty(&outcome)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: reservation inputs, agent blueprints, outcomes, validation
//! - **Provider**: the `VoiceAgentProvider` trait with live and mock variants
//! - **Service**: orchestration, retries, and service-owned shared state
//! - **Config**: settings loading with CLI overrides

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod provider;
pub mod retry;
pub mod service;
pub mod state;
