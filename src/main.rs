//! Charger booking service entry point
//!
//! REST API for booking and paying for EV charging slots.
//! Reads configuration from TOML file (~/.config/charger-booking/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use chargebook::application::{BookingService, PaymentService};
use chargebook::auth::JwtConfig;
use chargebook::domain::OverlapRule;
use chargebook::infrastructure::database::migrator::Migrator;
use chargebook::infrastructure::{
    SeaOrmBookingLedger, SeaOrmChargerRepository, SeaOrmUserRepository, StripeGateway,
};
use chargebook::support::{listen_for_shutdown_signals, ShutdownSignal};
use chargebook::{create_api_router, default_config_path, init_database, AppConfig, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("CHARGER_BOOKING_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting charger booking service...");

    // ── Build sub-configs from AppConfig ───────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "charger-booking".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Repositories and services ──────────────────────────────
    let chargers = Arc::new(SeaOrmChargerRepository::new(db.clone()));
    let users = Arc::new(SeaOrmUserRepository::new(db.clone()));
    let rule = OverlapRule::from_strict_flag(app_cfg.booking.strict_overlap_check);
    info!("Booking overlap rule: {:?}", rule);
    let ledger = Arc::new(SeaOrmBookingLedger::new(db.clone(), rule));
    let gateway = Arc::new(StripeGateway::new(&app_cfg.stripe));

    let bookings = Arc::new(BookingService::new(
        chargers.clone(),
        users.clone(),
        ledger.clone(),
    ));
    let payments = Arc::new(PaymentService::new(chargers, ledger, gateway));

    // ── HTTP server with graceful shutdown ─────────────────────
    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    let router = create_api_router(bookings, payments, jwt_config);

    let api_addr = format!("{}:{}", app_cfg.server.api_host, app_cfg.server.api_port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let server_shutdown = shutdown.clone();
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        server_shutdown.wait().await;
        info!("REST API server received shutdown signal");
    });

    // in-flight requests get at most shutdown_timeout seconds to drain
    let drain_limit = std::time::Duration::from_secs(app_cfg.server.shutdown_timeout);
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("REST API server error: {}", e);
            }
        }
        _ = shutdown.deadline(drain_limit) => {
            warn!(
                "Shutdown timeout ({}s) elapsed; aborting in-flight requests",
                app_cfg.server.shutdown_timeout
            );
        }
    }

    // Perform final cleanup
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Charger booking service shutdown complete");
    Ok(())
}
