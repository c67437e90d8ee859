//! Disease predictor server
//!
//! Loads the diabetes, heart disease and Parkinson's classifiers once and
//! serves form submissions over HTTP. If any classifier fails to load the
//! server still answers health probes but exposes no prediction routes.

use anyhow::Result;
use outbreak_server::{
    api,
    config::{LogFormat, ServerConfig},
    startup,
};
use predictor_lib::{HealthRegistry, PredictorMetrics, StructuredLogger};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load()?;

    // Initialize tracing with the configured output and env filter
    let json = config.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer()))
        .init();

    info!(
        addr = %config.listen_addr(),
        model_dir = %config.model_dir.display(),
        "Server configured"
    );

    let logger = StructuredLogger::new(config.listen_addr());
    logger.log_startup(SERVER_VERSION, &config.model_dir.display().to_string());

    let provider = config.provider();
    let state = startup::initialize(
        &provider,
        HealthRegistry::new(),
        PredictorMetrics::new(),
        logger.clone(),
    )
    .await;

    // Start health, metrics and prediction server
    let api_handle = tokio::spawn(api::serve(config.listen_addr(), Arc::new(state)));

    tokio::select! {
        result = api_handle => {
            result??;
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            logger.log_shutdown("SIGINT received");
            info!("Shutting down");
        }
    }

    Ok(())
}
