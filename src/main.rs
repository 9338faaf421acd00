mod model;
mod server;

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    scheduler::billing,
    service::{admin::code::AdminCodeService, provider::PaymentProviders},
    startup,
    state::{AppState, BillingSettings},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let providers = PaymentProviders::from_config(&config)?;

    let admin_code_service = AdminCodeService::new();

    tracing::info!("Starting server");

    // Check for a super admin and log a bootstrap code if none exists
    startup::check_for_super_admin(&db, &config, &admin_code_service).await?;

    let scheduler_db = db.clone();
    let invoice_due_days = config.invoice_due_days;
    tokio::spawn(async move {
        if let Err(e) = billing::start_scheduler(scheduler_db, invoice_due_days).await {
            tracing::error!("Billing scheduler error: {}", e);
        }
    });

    let origin = config
        .app_url
        .parse::<HeaderValue>()
        .map_err(|_| ConfigError::InvalidEnvVar {
            name: "APP_URL".to_string(),
            value: config.app_url.clone(),
        })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    let router = server::router::router()
        .with_state(AppState::new(
            db,
            providers,
            admin_code_service,
            BillingSettings {
                currency: config.currency.clone(),
                invoice_due_days: config.invoice_due_days,
            },
        ))
        .layer(session)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, router).await?;

    Ok(())
}
