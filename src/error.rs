use thiserror::Error;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TripFinderError {
    #[error("Invalid request data: {0}")]
    ValidationError(String),

    #[error("An error occurred while searching trips")]
    SearchFailed,

    #[error("Request cancelled")]
    Cancelled,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for TripFinderError {
    fn status_code(&self) -> StatusCode {
        match self {
            TripFinderError::ValidationError(_) => StatusCode::BAD_REQUEST,
            TripFinderError::NotFound(_) => StatusCode::NOT_FOUND,
            TripFinderError::Cancelled => StatusCode::REQUEST_TIMEOUT,
            TripFinderError::SearchFailed | TripFinderError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            TripFinderError::ValidationError(msg) => {
                HttpResponse::BadRequest().json(json!({
                    "error": "validation_error",
                    "message": msg
                }))
            }
            TripFinderError::SearchFailed => {
                HttpResponse::InternalServerError().json(json!({
                    "error": "search_failed",
                    "message": "An error occurred while searching trips"
                }))
            }
            TripFinderError::Cancelled => {
                HttpResponse::RequestTimeout().json(json!({
                    "error": "cancelled",
                    "message": "The request was cancelled before it completed"
                }))
            }
            TripFinderError::NotFound(msg) => {
                HttpResponse::NotFound().json(json!({
                    "error": "not_found",
                    "message": msg
                }))
            }
            TripFinderError::Internal(msg) => {
                log::error!("Internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "internal_error",
                    "message": "An internal server error occurred"
                }))
            }
        }
    }
}
