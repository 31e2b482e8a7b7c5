//! Mailhub API Server
//!
//! Backend for a small marketing hub: an access-code gated API that sends
//! email campaigns stored in a Cosmic CMS bucket through Resend.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{CosmicCampaignRepository, ResendClient};
use app::CampaignService;
use auth::SessionSettings;
use config::Config;
use domain::ports::{CampaignRepository, EmailSender};

/// Campaign service over whichever store and sender the server was built with
pub type DynCampaignService = CampaignService<dyn CampaignRepository, dyn EmailSender>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub campaign_service: Arc<DynCampaignService>,
    pub sessions: Arc<SessionSettings>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Login route, kept separate so the server can put it behind the rate limiter
fn login_routes() -> Router<AppState> {
    Router::new().route("/api/auth/login", post(handlers::login))
}

/// Build the application router
fn build_router(state: AppState, login: Router<AppState>) -> Router {
    // Routes that require a dashboard session
    let protected = Router::new()
        .route("/api/campaigns/:id/send", post(handlers::send_campaign))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::session_middleware,
        ));

    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .route("/api/auth/logout", post(handlers::logout))
        .merge(login)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mailhub_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Mailhub API...");

    // Load configuration
    let config = Config::from_env();

    if !config.email_enabled() {
        tracing::warn!("RESEND_API_KEY is not set; campaign sends will fail until it is provided");
    }

    // Create adapters
    let campaign_repo: Arc<dyn CampaignRepository> = Arc::new(CosmicCampaignRepository::new(
        config.cosmic_api_url.clone(),
        config.cosmic_bucket_slug.clone(),
        config.cosmic_read_key.clone(),
        config.cosmic_write_key.clone(),
    ));

    let email_sender: Arc<dyn EmailSender> = Arc::new(ResendClient::new(
        config.resend_api_url.clone(),
        config.resend_api_key.clone(),
    ));

    // Create application services
    let campaign_service = Arc::new(CampaignService::new(
        campaign_repo,
        email_sender,
        config.email_from.clone(),
    ));

    // Create app state
    let state = AppState {
        campaign_service,
        sessions: Arc::new(SessionSettings::from_config(&config)),
    };

    // Login rate limit per client IP: burst of 5, then one attempt every 6 seconds
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(6)
            .burst_size(5)
            .finish()
            .expect("Failed to build governor config"),
    );

    let login = login_routes().layer(GovernorLayer {
        config: governor_config,
    });

    let app = build_router(state, login);

    // Start server
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
