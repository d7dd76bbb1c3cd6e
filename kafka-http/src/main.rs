//! Process entry point: environment config, one shared broker client,
//! HTTP server with graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use kafka_bridge::{BridgeConfig, KafkaBroker};
use kafka_http::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        error!("Bridge failed: {:?}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = BridgeConfig::from_env();
    info!(brokers = %config.brokers, group_id = %config.group_id, "Connecting to Kafka");

    let broker = Arc::new(KafkaBroker::new(config.clone())?);
    let state = AppState {
        broker: broker.clone(),
        config,
    };
    let app = create_router(state);

    let addr = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!(address = %addr, "Bridge listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Records accepted by POST may still sit in the producer queue.
    info!("Flushing producer queue");
    broker.shutdown(Duration::from_secs(5))?;

    info!("Bridge stopped");
    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    match wait_for_signal().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}

async fn wait_for_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;

        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
    }

    Ok(())
}
