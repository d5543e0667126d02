use axum::{
    extract::multipart::MultipartError,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use pixelsheet_core::{ConvertError, GatewayErrorKind, ValidationReason};
use serde_json::json;
use thiserror::Error;

/// Seconds a rate-limited caller is told to wait
const RETRY_AFTER_SECS: &str = "30";

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            // Includes SHEET_NOT_FOUND: a wrong gid is an input error
            AppError::Convert(ConvertError::Validation { .. }) => StatusCode::BAD_REQUEST,
            AppError::Convert(ConvertError::Gateway { kind }) => match kind {
                GatewayErrorKind::AuthExpired => StatusCode::UNAUTHORIZED,
                GatewayErrorKind::Forbidden => StatusCode::FORBIDDEN,
                GatewayErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
                GatewayErrorKind::NotFound => StatusCode::BAD_REQUEST,
                GatewayErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
                GatewayErrorKind::BadRequest => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Convert(ConvertError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Multipart(e) => e.status(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Convert(e) => e.code(),
            AppError::Multipart(_) => "MALFORMED_UPLOAD",
        }
    }
}

impl From<ValidationReason> for AppError {
    fn from(reason: ValidationReason) -> Self {
        AppError::Convert(ConvertError::validation(reason))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Convert(ConvertError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Convert(e @ ConvertError::Gateway { .. }) => {
                tracing::warn!("Spreadsheet service error: {}", e);
                e.to_string()
            }
            AppError::Multipart(e) => {
                tracing::debug!("Multipart error: {:?}", e);
                self.to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message,
            "code": self.code(),
        }));

        if status == StatusCode::TOO_MANY_REQUESTS {
            return (status, [(header::RETRY_AFTER, RETRY_AFTER_SECS)], body).into_response();
        }
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ConvertError::validation(ValidationReason::NonPositiveColumns),
                StatusCode::BAD_REQUEST,
            ),
            (
                ConvertError::validation(ValidationReason::SheetNotFound),
                StatusCode::BAD_REQUEST,
            ),
            (
                ConvertError::validation(ValidationReason::GridTooLarge),
                StatusCode::BAD_REQUEST,
            ),
            (
                ConvertError::Gateway {
                    kind: GatewayErrorKind::NotFound,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ConvertError::Gateway {
                    kind: GatewayErrorKind::AuthExpired,
                },
                StatusCode::UNAUTHORIZED,
            ),
            (
                ConvertError::Gateway {
                    kind: GatewayErrorKind::Forbidden,
                },
                StatusCode::FORBIDDEN,
            ),
            (
                ConvertError::Gateway {
                    kind: GatewayErrorKind::Unavailable,
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ConvertError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_rate_limited_sets_retry_after() {
        let response = AppError::from(ConvertError::Gateway {
            kind: GatewayErrorKind::RateLimited,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            RETRY_AFTER_SECS
        );
    }
}
