//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use radicar_core::ErrorKind;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Missing or unknown `x-actor-id` header.
  #[error("unknown actor")]
  Unauthorized,

  #[error(transparent)]
  Domain(#[from] radicar_core::Error),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
      ApiError::Domain(e) => (status_for(e.kind()), e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

/// One status code per failure family; handlers never pick codes ad hoc.
fn status_for(kind: ErrorKind) -> StatusCode {
  match kind {
    ErrorKind::Validation => StatusCode::BAD_REQUEST,
    ErrorKind::NotFound => StatusCode::NOT_FOUND,
    ErrorKind::Authorization => StatusCode::FORBIDDEN,
    ErrorKind::InvalidState => StatusCode::CONFLICT,
    ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
  }
}
