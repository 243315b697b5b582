//! HTTP error mapping

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use scout_core::error::DomainError;
use thiserror::Error;

use crate::response::ApiResponse;

/// Errors carry a stable machine code and a client-facing message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {1}")]
    BadRequest(&'static str, String),

    #[error("Unauthorized: {1}")]
    Unauthorized(&'static str, String),

    #[error("Not found: {1}")]
    NotFound(&'static str, String),

    /// Detail is logged, never sent.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn unauthenticated() -> Self {
        ApiError::Unauthorized("UNAUTHORIZED", DomainError::Unauthenticated.to_string())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::BadRequest("VALIDATION_ERROR", message.into())
    }

    pub fn invalid_report_id() -> Self {
        ApiError::BadRequest("INVALID_ID", "Invalid report ID".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(code, msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, code, msg)
            }
            ApiError::Unauthorized(code, msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, code, msg)
            }
            ApiError::NotFound(code, msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, code, msg)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<()>::error(code, &message))).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::InvalidCredentials => ApiError::Unauthorized("INVALID_CREDENTIALS", message),
            DomainError::Unauthenticated => ApiError::Unauthorized("UNAUTHORIZED", message),
            DomainError::EmailAlreadyExists(_) => ApiError::BadRequest("EMAIL_EXISTS", message),
            DomainError::InvalidRegistrationCode => {
                ApiError::BadRequest("INVALID_REGISTRATION_CODE", message)
            }
            DomainError::GroupNameAlreadyExists(_) | DomainError::RegistrationCodeAlreadyExists => {
                ApiError::BadRequest("GROUP_EXISTS", message)
            }
            DomainError::ReportNotFound => ApiError::NotFound("REPORT_NOT_FOUND", message),
            DomainError::SprayChartNotFound => ApiError::NotFound("SPRAY_CHART_NOT_FOUND", message),
            DomainError::NoFileUploaded => ApiError::BadRequest("NO_FILE", message),
            DomainError::FileTooLarge { .. } => ApiError::BadRequest("FILE_TOO_LARGE", message),
            DomainError::UnsupportedMediaType(_) => {
                ApiError::BadRequest("UNSUPPORTED_MEDIA_TYPE", message)
            }
            DomainError::ValidationError(msg) => ApiError::validation(msg),
            DomainError::PasswordHashError(_)
            | DomainError::DatabaseError(_)
            | DomainError::StorageError(_)
            | DomainError::InternalError(_) => ApiError::InternalError(message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::BadRequest("FILE_TOO_LARGE", "File too large".to_string())
        } else {
            ApiError::validation(err.body_text())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_mapping() {
        let cases = [
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::InvalidRegistrationCode, StatusCode::BAD_REQUEST),
            (DomainError::EmailAlreadyExists("a@b.c".into()), StatusCode::BAD_REQUEST),
            (DomainError::ReportNotFound, StatusCode::NOT_FOUND),
            (DomainError::FileTooLarge { limit: 1 }, StatusCode::BAD_REQUEST),
            (DomainError::DatabaseError("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let err = ApiError::from(DomainError::DatabaseError("password=hunter2".into()));
        assert!(matches!(&err, ApiError::InternalError(msg) if msg.contains("hunter2")));
    }
}
