//! HTTP surface of the Kafka bridge.
//!
//! Two operations share the `/message` path: `POST` publishes a
//! form-encoded batch, `GET` drains a topic until it goes idle. Both
//! report failures as a JSON array of strings.

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, Result};
pub use handlers::AppState;
pub use routes::create_router;
