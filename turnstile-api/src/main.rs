use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use turnstile_api::{app, app_config::Config, AppState};
use turnstile_core::{MockPaymentService, MockSeatReservationService};
use turnstile_order::TicketService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "turnstile_api=debug,turnstile_order=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting Turnstile API on port {}", config.server.port);

    // Payment and seat booking are third-party; swap in real clients here.
    let ticket_service = TicketService::builder()
        .policy(config.policy.clone())
        .payment_service(Arc::new(MockPaymentService))
        .seat_reservation_service(Arc::new(MockSeatReservationService))
        .build()?;

    let app_state = AppState {
        ticket_service: Arc::new(ticket_service),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(app_state)).await?;
    Ok(())
}
