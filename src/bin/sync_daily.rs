use std::sync::Arc;
use stocks_ingest::config::Config;
use stocks_ingest::database::establish_connection_pool;
use stocks_ingest::database::repositories::{
    CandleRepository, CandleRepositoryImpl, InstrumentRepository, InstrumentRepositoryImpl,
};
use stocks_ingest::datasource::RestClient;
use stocks_ingest::jobs::DailyCandleSyncJob;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Daily Candle Sync entry point
#[tokio::main]
async fn main() {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stocks_ingest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&config.database_url, config.pool_size) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to open database {}: {}", config.database_url, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = pool.run_migrations() {
        tracing::error!("Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    let pool_clone = pool.clone();
    let instruments: Arc<dyn InstrumentRepository> =
        Arc::new(InstrumentRepositoryImpl::new(move || pool_clone.get_conn()));
    let pool_clone = pool.clone();
    let candles: Arc<dyn CandleRepository> =
        Arc::new(CandleRepositoryImpl::new(move || pool_clone.get_conn()));
    let api = Arc::new(RestClient::new(&config.base_url, &config.token));

    let job = DailyCandleSyncJob::new(instruments, candles, api);
    match job.run().await {
        Ok(report) => report.log_summary("daily_candle_sync"),
        Err(e) => {
            tracing::error!("Daily candle sync aborted: {}", e);
            std::process::exit(1);
        }
    }
}
