use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;

use crate::domains::user::service::UserServiceError;

#[derive(Debug)]
pub struct AppError {
  pub status_code: StatusCode,
  pub message: String,
}

impl AppError {
  pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status_code,
      message: message.into(),
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::new(StatusCode::NOT_FOUND, message)
  }

  pub fn internal_server_error(message: impl Into<String>) -> Self {
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let body = Json(json!({ "error": self.message }));
    (self.status_code, body).into_response()
  }
}

impl From<serde_json::Error> for AppError {
  fn from(error: serde_json::Error) -> Self {
    // Body parse failures are caught at the handler boundary and surface
    // as 500 with the parser message, like every other internal failure.
    AppError::internal_server_error(error.to_string())
  }
}

impl From<UserServiceError> for AppError {
  fn from(error: UserServiceError) -> Self {
    match error {
      UserServiceError::NotFound(msg) => AppError::not_found(msg),
      // Uniqueness conflicts are not given their own status code; they
      // share the 500 surface with any other store failure.
      UserServiceError::Conflict(msg) => AppError::internal_server_error(msg),
      UserServiceError::Store(msg) => AppError::internal_server_error(msg),
    }
  }
}
