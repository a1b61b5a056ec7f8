//! API error types and handling.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use datascore::DataScoreError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Multipart body could not be read.
    Upload(MultipartError),
    /// Error from the datascore library.
    DataScore(DataScoreError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn parts(self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Upload(e) => (e.status(), "invalid_upload", e.body_text()),
            ApiError::DataScore(e) => {
                let error = match &e {
                    DataScoreError::Csv(_) | DataScoreError::MalformedInput(_) => {
                        "malformed_input"
                    }
                    DataScoreError::EmptyDataset(_) => "empty_dataset",
                    DataScoreError::InvalidConfig(_) | DataScoreError::Json(_) => "bad_request",
                    DataScoreError::Io { .. } => "internal",
                };
                let status = if e.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, error, e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(%status, "{}", message);
        } else {
            tracing::debug!(%status, error, "{}", message);
        }

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<DataScoreError> for ApiError {
    fn from(err: DataScoreError) -> Self {
        ApiError::DataScore(err)
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Upload(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Upload(e) => write!(f, "Invalid upload: {}", e),
            ApiError::DataScore(e) => write!(f, "DataScore error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_errors_map_to_status() {
        let cases = [
            (
                DataScoreError::EmptyDataset("no rows".into()),
                StatusCode::BAD_REQUEST,
                "empty_dataset",
            ),
            (
                DataScoreError::MalformedInput("blank".into()),
                StatusCode::BAD_REQUEST,
                "malformed_input",
            ),
            (
                DataScoreError::InvalidConfig("share".into()),
                StatusCode::BAD_REQUEST,
                "bad_request",
            ),
            (
                DataScoreError::Io {
                    path: "x.csv".into(),
                    source: std::io::Error::other("disk"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
            ),
        ];

        for (err, status, code) in cases {
            let (got_status, got_code, _) = ApiError::from(err).parts();
            assert_eq!(got_status, status);
            assert_eq!(got_code, code);
        }
    }
}
