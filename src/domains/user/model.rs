use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A row of the `users` table. `first_name`/`last_name` are nullable in
/// storage but always surface as empty strings here and in JSON output.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
  pub id: Uuid,
  pub username: String,
  pub email: String,
  #[serde(skip_serializing)]
  pub password_hash: String,
  pub first_name: String,
  pub last_name: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateUserRequest {
  pub username: String,
  pub email: String,
  pub password: String,
  pub first_name: String,
  pub last_name: String,
}

impl CreateUserRequest {
  /// Extracts the create fields from a validated payload. Optional name
  /// fields default to empty strings.
  pub fn from_payload(payload: &Value) -> Self {
    Self {
      username: string_field(payload, "username"),
      email: string_field(payload, "email"),
      password: string_field(payload, "password"),
      first_name: string_field(payload, "first_name"),
      last_name: string_field(payload, "last_name"),
    }
  }
}

/// Partial update. An empty string means "leave this column unchanged";
/// absent keys collapse to empty strings as well, so a caller cannot clear
/// a name field to empty through this API.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
  pub username: String,
  pub email: String,
  pub first_name: String,
  pub last_name: String,
}

impl UpdateUserRequest {
  pub fn from_payload(payload: &Value) -> Self {
    Self {
      username: string_field(payload, "username"),
      email: string_field(payload, "email"),
      first_name: string_field(payload, "first_name"),
      last_name: string_field(payload, "last_name"),
    }
  }
}

fn string_field(payload: &Value, key: &str) -> String {
  payload
    .get(key)
    .and_then(Value::as_str)
    .unwrap_or_default()
    .to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateUserResponse {
  pub id: Uuid,
  pub username: String,
  pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateUserResponse {
  pub id: Uuid,
  pub username: String,
  pub email: String,
  pub first_name: String,
  pub last_name: String,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteUserResponse {
  pub message: String,
  pub id: String,
}
