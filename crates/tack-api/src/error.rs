//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// Well-formed request that references entities the tenant does not have.
  #[error("unprocessable: {0}")]
  Unprocessable(String),

  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<tack_core::Error> for ApiError {
  fn from(err: tack_core::Error) -> Self {
    use tack_core::Error as E;
    match err {
      E::InvalidTenant(id) => Self::NotFound(format!("tenant {id} not found")),
      E::InvalidTagReference { tag_id, .. } => {
        Self::Unprocessable(format!("tag {tag_id} not found for tenant"))
      }
      E::InvalidPagination(msg) => Self::BadRequest(msg),
      E::InvalidRange { start, end } => {
        Self::BadRequest(format!("invalid range: {start} > {end}"))
      }
      E::Unavailable(source) => Self::Internal(source),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unprocessable(m) => {
        (StatusCode::UNPROCESSABLE_ENTITY, m.clone())
      }
      ApiError::Internal(e) => {
        tracing::error!(error = %e, "internal error serving request");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
