//! Error types for the bridge library.

use thiserror::Error;

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur while talking to the broker.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Error from the underlying rdkafka library.
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}
