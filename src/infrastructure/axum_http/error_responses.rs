use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::domain::errors::DeliveryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Invalid request.",
            ErrorKind::NotFound => "The resource was not found.",
            ErrorKind::Internal => "Internal error.",
        }
    }
}

impl From<&DeliveryError> for ErrorKind {
    fn from(value: &DeliveryError) -> Self {
        if value.is_not_found() {
            ErrorKind::NotFound
        } else {
            ErrorKind::Internal
        }
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredError {
    pub status: u16,
    pub message: String,
    #[serde(rename = "error")]
    pub cause: String,
    pub timestamp: String,
    pub path: String,
}

pub fn classify(kind: ErrorKind, cause: impl Display, path: &str) -> StructuredError {
    StructuredError {
        status: kind.status().as_u16(),
        message: kind.message().to_string(),
        cause: cause.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        path: path.to_string(),
    }
}

impl IntoResponse for StructuredError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn bad_request_carries_cause_and_path() {
        let error = classify(ErrorKind::BadRequest, "broken body", "/deliveries");

        assert_eq!(error.status, 400);
        assert_eq!(error.message, "Invalid request.");
        assert_eq!(error.cause, "broken body");
        assert_eq!(error.path, "/deliveries");
    }

    #[test]
    fn timestamp_is_rfc3339() {
        let error = classify(ErrorKind::Internal, "boom", "/deliveries");

        assert!(DateTime::parse_from_rfc3339(&error.timestamp).is_ok());
        assert!(error.timestamp.ends_with('Z'));
    }

    #[test]
    fn only_the_sentinel_maps_to_not_found() {
        assert_eq!(
            ErrorKind::from(&DeliveryError::NotFound(1)),
            ErrorKind::NotFound
        );
        assert_eq!(
            ErrorKind::from(&DeliveryError::DeadlineExceeded),
            ErrorKind::Internal
        );
        assert_eq!(
            ErrorKind::from(&DeliveryError::Storage(anyhow::anyhow!("pool closed"))),
            ErrorKind::Internal
        );
    }

    #[test]
    fn cause_is_serialized_as_error() {
        let error = classify(ErrorKind::NotFound, "delivery 9 not found", "/deliveries/9");
        let body = serde_json::to_value(&error).unwrap();

        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], "delivery 9 not found");
        assert_eq!(body["message"], "The resource was not found.");
        assert!(body.get("cause").is_none());
    }
}
