use clap::Parser;
use concierge::cli::Cli;
use concierge::config::{ProviderMode, Settings};
use concierge::domain::{CallLogQuery, CustomerInfo, ReservationDetails, RestaurantInfo};
use concierge::error::ServiceError;
use concierge::service::ReservationService;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let cli = Cli::parse();
    let mut settings = Settings::new_with_cli(&cli)?;

    info!("Starting concierge with {} provider", settings.provider.mode);

    // Build the service; fall back to mock mode when live construction
    // fails, typically for a missing credential
    let mut service = match ReservationService::new(settings.clone()) {
        Ok(service) => service,
        Err(ServiceError::Configuration(msg))
            if settings.provider.mode == ProviderMode::Live =>
        {
            warn!("Live provider unavailable ({}); continuing in mock mode", msg);
            settings.provider.mode = ProviderMode::Mock;
            ReservationService::new(settings.clone())?
        }
        Err(err) => return Err(err.into()),
    };

    // Probe the API before doing real work
    let report = service.test_api_connection().await;
    println!(
        "Connection test result: {}",
        serde_json::to_string_pretty(&report)?
    );

    if !report.api_accessible && settings.provider.mode == ProviderMode::Live {
        warn!("API connection failed; continuing in mock mode for demonstration");
        settings.provider.mode = ProviderMode::Mock;
        service = ReservationService::new(settings)?;
    }

    // Sample reservation mirroring a typical booking request
    let restaurant = RestaurantInfo {
        name: "Spice Garden Restaurant".to_string(),
        phone: Some("+919876543210".to_string()),
    };
    let reservation = ReservationDetails {
        date: Some("Tomorrow".to_string()),
        time: Some("7:30 PM".to_string()),
        party_size: Some(4),
        special_requests: Some("Window seat preferred, celebrating anniversary".to_string()),
    };
    let customer = CustomerInfo {
        name: Some("Ayush Kumar".to_string()),
        email: Some("ayush.kumar@example.com".to_string()),
        phone: Some("+919876543211".to_string()),
    };

    info!("Making restaurant reservation");
    let outcome = service
        .make_restaurant_reservation(restaurant, reservation, customer)
        .await;
    println!(
        "Reservation result: {}",
        serde_json::to_string_pretty(&outcome)?
    );

    // Show the call logs for the agent that just placed the call
    if let Some(confirmation) = outcome.confirmation() {
        let query = CallLogQuery::for_agent(&confirmation.agent_id).with_page_size(5);
        match service.get_call_logs(query).await {
            Ok(logs) => println!("Recent call logs: {}", serde_json::to_string_pretty(&logs)?),
            Err(err) => warn!("Could not retrieve call logs: {}", err),
        }
    }

    Ok(())
}
