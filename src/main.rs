use basketfi::{
    config::Settings,
    database::{establish_connection, run_migrations},
    handlers::create_router,
    services::{PgPriceStore, PriceUpdateJob},
    AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;

    // RUST_LOG wins over LOG_LEVEL when both are set
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.logging.level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting BasketFi");
    info!("Configuration loaded successfully");

    let db_pool = establish_connection(&settings.database).await?;
    if settings.database.run_migrations {
        run_migrations(&db_pool).await?;
    }

    let store = Arc::new(PgPriceStore::new(db_pool.clone()));
    let price_update_job = Arc::new(PriceUpdateJob::new(store));

    let scheduler_handle = match settings.price_update.interval_seconds {
        0 => {
            info!("In-process price updates disabled, waiting for external trigger");
            None
        }
        seconds => Some(price_update_job.clone().spawn_interval(Duration::from_secs(seconds))),
    };

    let app_state = AppState {
        db_pool,
        price_update_job,
    };

    let server_handle = {
        let address = settings.bind_address();
        tokio::spawn(async move {
            if let Err(e) = start_web_server(app_state, &address).await {
                error!("Web server error: {}", e);
            }
        })
    };

    info!("API server running on {}", settings.bind_address());

    tokio::select! {
        _ = server_handle => {
            error!("Web server stopped unexpectedly");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    if let Some(handle) = scheduler_handle {
        handle.abort();
    }

    info!("Shutting down BasketFi");
    Ok(())
}

async fn start_web_server(app_state: AppState, address: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(app_state);
    let listener = tokio::net::TcpListener::bind(address).await?;

    info!("API endpoints available at:");
    info!("  GET    /health - Health check");
    info!("  GET    /api/baskets?sort={{field}}&direction={{asc|desc}} - List baskets");
    info!("  POST   /api/baskets - Create basket");
    info!("  GET    /api/baskets/{{id}} - Get basket");
    info!("  PUT    /api/baskets/{{id}} - Update basket");
    info!("  DELETE /api/baskets/{{id}} - Delete basket");
    info!("  GET    /api/baskets/{{id}}/prices - Price history for charting");
    info!("  GET    /api/baskets/update-price-change - Recompute basket price changes");
    info!("  GET    /api/features?search={{term}} - List feature requests");
    info!("  POST   /api/features/vote - Upvote a feature request");

    axum::serve(listener, app).await?;
    Ok(())
}
