//! Error types for the HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kafka_bridge::BridgeError;
use thiserror::Error;

/// Errors a request handler can produce.
///
/// Every variant renders as a JSON array of human-readable strings, the
/// error body shape both endpoints share.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request validation failed")]
    Validation(Vec<String>),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Bridge(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Flatten into the list of strings the response body carries.
    pub fn into_errors(self) -> Vec<String> {
        match self {
            ApiError::Validation(errors) => errors,
            ApiError::Bridge(e) => vec![e.to_string()],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let errors = self.into_errors();

        if status.is_server_error() {
            tracing::error!(status = %status, errors = ?errors, "request failed");
        } else {
            tracing::warn!(status = %status, errors = ?errors, "request rejected");
        }

        (status, Json(errors)).into_response()
    }
}

/// Result type alias for handler operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let fixtures = vec![
            (
                ApiError::Validation(vec!["Undefined topic".to_string()]),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Bridge(BridgeError::Other("broker down".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in fixtures {
            assert_eq!(error.status_code(), expected_status);
        }
    }

    #[test]
    fn test_validation_errors_flatten_in_order() {
        let error = ApiError::Validation(vec![
            "Undefined topic".to_string(),
            "Undefined message".to_string(),
        ]);

        assert_eq!(
            error.into_errors(),
            vec!["Undefined topic", "Undefined message"]
        );
    }

    #[test]
    fn test_bridge_error_flattens_to_single_entry() {
        let error = ApiError::Bridge(BridgeError::Other("broker down".to_string()));

        assert_eq!(error.into_errors(), vec!["broker down"]);
    }
}
