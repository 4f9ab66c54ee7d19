//! HTTP error mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use notafacil_core::Error;

/// Error returned by every handler, rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub enum ApiError {
    /// Storage or other server-side failure
    Internal(Error),
    NotFound(String),
    BadRequest(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match &err {
            Error::NotFound(_) | Error::NoteNotFound(_) => ApiError::NotFound(err.to_string()),
            Error::Validation(_) | Error::MalformedJson(_) | Error::UnexpectedShape(_) => {
                ApiError::BadRequest(err.to_string())
            }
            Error::InvalidNoteData { .. } if !err.is_infrastructure() => {
                ApiError::BadRequest(err.to_string())
            }
            _ => ApiError::Internal(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Internal(err) => {
                tracing::error!(
                    subsystem = "api",
                    component = "error",
                    error = %err,
                    "Request failed"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notafacil_core::ValidationError;

    fn status_of(err: Error) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(Error::Validation(ValidationError::EmptyTitle)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(Error::MalformedJson("eof".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(Error::UnexpectedShape("object".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(Error::NoteNotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(Error::NotFound("Tag x not found".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(Error::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_note_data_status_follows_cause() {
        let bad_data = Error::InvalidNoteData {
            index: 0,
            source: Box::new(Error::Validation(ValidationError::EmptyTitle)),
        };
        assert_eq!(status_of(bad_data), StatusCode::BAD_REQUEST);

        let storage_down = Error::InvalidNoteData {
            index: 3,
            source: Box::new(Error::Internal("storage unavailable".into())),
        };
        assert_eq!(status_of(storage_down), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
