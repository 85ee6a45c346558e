use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use coinboard_core::checkout::{CheckoutErrors, FieldError};
use serde::Serialize;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Validation(#[from] CheckoutErrors),

    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    field_errors: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, field_errors) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, Vec::new()),
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                errors.to_string(),
                errors.errors,
            ),
            ApiError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message, Vec::new())
            }
        };

        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
            field_errors,
        });
        (status, body).into_response()
    }
}

impl From<coinboard_core::Error> for ApiError {
    fn from(err: coinboard_core::Error) -> Self {
        match err {
            coinboard_core::Error::Validation(e) => ApiError::BadRequest(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
