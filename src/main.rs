mod chain;
mod config;
mod errors;
mod extractor;
mod handlers;
mod ledger;
mod matcher;
mod models;
mod ocr;
mod pipeline;
mod record_store;
mod verdict;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::chain::ChainVerifier;
use crate::config::Config;
use crate::extractor::ExtractionRules;
use crate::ledger::JsonRpcLedgerClient;
use crate::ocr::TesseractOcr;
use crate::record_store::RecordStore;

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - The reference record store.
/// - The OCR engine and ledger client.
/// - HTTP routes and middleware (CORS, Rate Limiting).
///
/// It then starts the Axum server.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok if the server runs successfully, or an error if initialization fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_certverify_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Load the reference dataset (read-only for the process lifetime;
    // reload requires a restart)
    let store = RecordStore::load(Path::new(&config.records_path));
    tracing::info!("Reference records loaded: {}", store.len());

    // OCR engine
    let ocr = Arc::new(TesseractOcr::new(
        config.ocr_binary.clone(),
        config.ocr_language.clone(),
        Duration::from_secs(config.ocr_timeout_secs),
    ));
    tracing::info!(
        "OCR engine initialized: {} ({})",
        config.ocr_binary,
        config.ocr_language
    );

    // Ledger client against the deployed registry contract
    let ledger = JsonRpcLedgerClient::new(
        config.ethereum_rpc.clone(),
        config.contract_address.clone(),
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize ledger client: {}", e))?;
    tracing::info!(
        "Ledger client initialized: {} (contract {})",
        config.ethereum_rpc,
        config.contract_address
    );
    let chain = ChainVerifier::new(Arc::new(ledger));

    // Build application state
    let port = config.port;
    let max_upload_bytes = config.max_upload_bytes as usize;
    let app_state = Arc::new(crate::handlers::AppState {
        config,
        store,
        ocr,
        rules: ExtractionRules::default_rules(),
        chain,
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    // Build protected routes with security layers
    let protected_routes = Router::new()
        .route("/api/v1/verify", post(handlers::verify_certificate))
        .layer(
            ServiceBuilder::new()
                // Request size limit: document limit plus multipart framing
                .layer(RequestBodyLimitLayer::new(max_upload_bytes + 64 * 1024))
                // Raise axum's own extractor limit to match
                .layer(DefaultBodyLimit::max(max_upload_bytes + 64 * 1024))
                // Rate limiting: 10 req/sec per IP, burst of 20 (prevents DDoS)
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    // Build final app with health check (bypasses rate limiting)
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
