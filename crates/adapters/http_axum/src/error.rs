//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use notigate_domain::error::NotigateError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`NotigateError`] to an HTTP response with appropriate status code.
pub struct ApiError(NotigateError);

impl From<NotigateError> for ApiError {
    fn from(err: NotigateError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            NotigateError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            NotigateError::Dispatch(err) => {
                tracing::error!(error = %err, "dispatch error");
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notigate_domain::error::{DispatchError, ValidationError};

    #[test]
    fn should_map_validation_error_to_bad_request() {
        let response =
            ApiError::from(NotigateError::from(ValidationError::EmptyMessage)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn should_map_dispatch_error_to_bad_gateway() {
        let err = NotigateError::from(DispatchError {
            service: "notify.pixel".to_string(),
            reason: "connection refused".to_string(),
        });
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
