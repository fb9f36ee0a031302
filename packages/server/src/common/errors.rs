use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors surfaced by the review engine and the submission pipeline
#[derive(Error, Debug)]
pub enum ReviewError {
    /// Upstream feed unreachable or returned something we could not parse
    #[error("Couldn't retrieve locations from feed: {0}")]
    Retrieval(#[source] anyhow::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid Google Maps URL!")]
    InvalidMapsUrl,

    #[error("this location is already checked")]
    AlreadyResolved(i64),

    #[error("Entry {0} is not in the current feed snapshot")]
    UnknownEntry(i64),

    #[error("Entry not found.")]
    RecordNotFound(i64),

    #[error("User not found.")]
    AuthenticationRequired,

    #[error("You are not allowed to access here.")]
    PermissionDenied,

    #[error("Storage error: {0}")]
    Store(#[source] anyhow::Error),
}

impl ReviewError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReviewError::Validation(_) | ReviewError::InvalidMapsUrl => StatusCode::BAD_REQUEST,
            ReviewError::AlreadyResolved(_) => StatusCode::CONFLICT,
            ReviewError::UnknownEntry(_) | ReviewError::RecordNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ReviewError::AuthenticationRequired | ReviewError::PermissionDenied => {
                StatusCode::UNAUTHORIZED
            }
            ReviewError::Retrieval(_) => StatusCode::BAD_GATEWAY,
            ReviewError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }
        (status, self.to_string()).into_response()
    }
}

pub type ReviewResult<T> = std::result::Result<T, ReviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ReviewError::InvalidMapsUrl.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ReviewError::AlreadyResolved(7).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ReviewError::PermissionDenied.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ReviewError::Retrieval(anyhow::anyhow!("timeout")).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_already_resolved_message() {
        assert_eq!(
            ReviewError::AlreadyResolved(42).to_string(),
            "this location is already checked"
        );
    }
}
