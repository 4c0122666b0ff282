use axum::{
  body::Bytes,
  extract::{Path, State},
  http::StatusCode,
  response::Json,
  routing::{get, post, Router},
};
use serde_json::Value;

use super::model::{
  CreateUserRequest, CreateUserResponse, DeleteUserResponse, UpdateUserRequest, UpdateUserResponse,
  User,
};
use super::validation;
use crate::error::AppError;
use crate::state::AppState;

pub fn user_routes<S: AppState>() -> Router<S> {
  Router::new()
    .route("/users", post(create_user_handler::<S>).get(list_users_handler::<S>))
    .route(
      "/users/{id}",
      get(get_user_handler::<S>)
        .put(update_user_handler::<S>)
        .delete(delete_user_handler::<S>),
    )
}

/// Bodies are read raw and parsed here instead of through the `Json`
/// extractor so that an unparseable body is handled like any other
/// internal failure rather than rejected before the handler runs.
pub async fn create_user_handler<S: AppState>(
  State(state): State<S>,
  body: Bytes,
) -> Result<(StatusCode, Json<CreateUserResponse>), AppError> {
  let payload: Value = serde_json::from_slice(&body)?;

  if !validation::validate_create(&payload) {
    return Err(AppError::bad_request("Invalid user data"));
  }

  let created = state.create_user(CreateUserRequest::from_payload(&payload)).await?;
  Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_user_handler<S: AppState>(
  State(state): State<S>,
  Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
  let user = state.get_user(&id).await?;
  Ok(Json(user))
}

pub async fn list_users_handler<S: AppState>(
  State(state): State<S>,
) -> Result<Json<Vec<User>>, AppError> {
  let users = state.list_users().await?;
  Ok(Json(users))
}

pub async fn update_user_handler<S: AppState>(
  State(state): State<S>,
  Path(id): Path<String>,
  body: Bytes,
) -> Result<Json<UpdateUserResponse>, AppError> {
  let payload: Value = serde_json::from_slice(&body)?;

  if !validation::validate_update(&payload) {
    return Err(AppError::bad_request("Invalid update data"));
  }

  let updated = state.update_user(&id, UpdateUserRequest::from_payload(&payload)).await?;
  Ok(Json(updated))
}

pub async fn delete_user_handler<S: AppState>(
  State(state): State<S>,
  Path(id): Path<String>,
) -> Result<Json<DeleteUserResponse>, AppError> {
  state.delete_user(&id).await?;

  Ok(Json(DeleteUserResponse {
    message: "User deleted successfully".to_string(),
    id,
  }))
}
