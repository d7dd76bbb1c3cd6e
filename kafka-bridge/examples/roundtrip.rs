//! Example round trip: publish a batch, then drain it back.
//!
//! This example shows how to:
//! - Build a BridgeConfig from environment variables
//! - Publish keyed and unkeyed records through the broker
//! - Drain a topic with an ephemeral consumer session
//!
//! To run this example:
//! ```bash
//! cargo run --example roundtrip
//! ```
//!
//! Make sure you have a Kafka broker running on localhost:9092.

use std::time::Duration;

use kafka_bridge::{drain_topic, BridgeConfig, KafkaBroker, MessageBroker};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let topic = std::env::var("KAFKA_TOPIC").unwrap_or_else(|_| "bridge.demo".to_string());

    let config = BridgeConfig::from_env();
    let broker = KafkaBroker::new(config)?;
    info!("Broker client created");

    // Publish a small keyed batch
    for i in 1..=5 {
        let key = format!("key-{}", i);
        let payload = format!("payload-{}", i);
        info!("Publishing record {} to '{}'", i, topic);
        broker.publish(&topic, Some(&key), &payload)?;
    }

    // And one record with no key at all
    broker.publish(&topic, None, "unkeyed payload")?;

    // Make sure everything left the local queue before we start reading
    info!("Flushing pending records");
    broker.shutdown(Duration::from_secs(5))?;

    // Drain until the topic has been idle for two seconds
    info!("Draining '{}'", topic);
    let messages = drain_topic(&broker, &topic, Duration::from_millis(2000)).await?;

    info!("Drained {} messages", messages.len());
    for message in &messages {
        info!(
            "{} [{}/{}] key={:?}: {}",
            message.topic, message.partition, message.offset, message.key, message.message
        );
    }

    Ok(())
}
