use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use sensors::NmeaError;

/// Request failures. Every variant is a client error; the store itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error("invalid NMEA input: {0}")]
    Nmea(#[from] NmeaError),
    #[error("no GGA or RMC sentence in NMEA input")]
    NoPosition,
    #[error("no route for {0}")]
    NotFound(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidBody(rejection) => rejection.status(),
            GatewayError::Nmea(_) | GatewayError::NoPosition => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();

        tracing::warn!(%status, error = %self, "request rejected");

        let body = serde_json::json!({
            "success": false,
            "message": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}
