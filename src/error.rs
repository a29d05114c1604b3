//! Request error taxonomy.
//!
//! Every handler returns `Result<HttpResponse, ApiError>`; the
//! `ResponseError` impl renders the uniform `{success, message, data}`
//! envelope. Upstream failures are the one exception: their status and body
//! are passed through verbatim, exactly as the identity/storage service
//! produced them.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed request input. Raised before any transaction.
    Validation(String),
    NotFound(String),
    /// A business rule blocks the operation (e.g. force delete before soft
    /// delete, or deleting a category that is still referenced).
    PreconditionFailed(String),
    /// Conditional soft delete matched zero rows on an existing record.
    AlreadyDeleted(String),
    /// An upstream service answered >= 400, or the call itself failed.
    /// Status and body are surfaced to the caller untouched.
    Upstream { status: u16, body: serde_json::Value },
    /// Unexpected failure, including any error inside a transaction.
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg)
            | Self::NotFound(msg)
            | Self::PreconditionFailed(msg)
            | Self::AlreadyDeleted(msg)
            | Self::Internal(msg) => f.write_str(msg),
            Self::Upstream { status, .. } => {
                write!(f, "Upstream service responded with status {}.", status)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self::Internal(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::PreconditionFailed(_) | Self::AlreadyDeleted(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Upstream { body, .. } => HttpResponse::build(self.status_code()).json(body),
            _ => HttpResponse::build(self.status_code()).json(json!({
                "success": false,
                "message": self.to_string(),
                "data": null,
            })),
        }
    }
}
