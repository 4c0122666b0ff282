use std::sync::Mutex;

use async_trait::async_trait;
use axum::{
  body::Body,
  http::{Method, Request, StatusCode},
  Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::app::create_app;
use crate::domains::user::model::User;
use crate::domains::user::repository::{RepositoryError, UserRepository};
use crate::state::SharedAppState;

/// Store double backed by a Vec, mirroring the uniqueness and ordering
/// behavior of the real table.
#[derive(Default)]
pub struct InMemoryUserRepository {
  users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(
    &self,
    username: &str,
    email: &str,
    password_hash: &str,
    first_name: &str,
    last_name: &str,
  ) -> Result<Uuid, RepositoryError> {
    let mut users = self.users.lock().unwrap();

    if users.iter().any(|u| u.username == username || u.email == email) {
      return Err(RepositoryError::Conflict(
        "Username or email already exists".to_string(),
      ));
    }

    let now = Utc::now();
    let user = User {
      id: Uuid::new_v4(),
      username: username.to_string(),
      email: email.to_string(),
      password_hash: password_hash.to_string(),
      first_name: first_name.to_string(),
      last_name: last_name.to_string(),
      created_at: now,
      updated_at: now,
    };
    let id = user.id;
    users.push(user);

    Ok(id)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
    let users = self.users.lock().unwrap();
    Ok(users.iter().find(|u| u.id == id).cloned())
  }

  async fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
    let mut users = self.users.lock().unwrap().clone();
    users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(users)
  }

  async fn update(
    &self,
    id: Uuid,
    username: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
  ) -> Result<bool, RepositoryError> {
    let mut users = self.users.lock().unwrap();

    if !users.iter().any(|u| u.id == id) {
      return Ok(false);
    }

    let taken = users.iter().any(|u| {
      u.id != id
        && ((!username.is_empty() && u.username == username)
          || (!email.is_empty() && u.email == email))
    });
    if taken {
      return Err(RepositoryError::Conflict(
        "Username or email already exists".to_string(),
      ));
    }

    let user = users.iter_mut().find(|u| u.id == id).unwrap();
    if !username.is_empty() {
      user.username = username.to_string();
    }
    if !email.is_empty() {
      user.email = email.to_string();
    }
    if !first_name.is_empty() {
      user.first_name = first_name.to_string();
    }
    if !last_name.is_empty() {
      user.last_name = last_name.to_string();
    }
    user.updated_at = Utc::now();

    Ok(true)
  }

  async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
    let mut users = self.users.lock().unwrap();
    let before = users.len();
    users.retain(|u| u.id != id);
    Ok(users.len() < before)
  }
}

pub fn test_app() -> Router {
  create_app(SharedAppState::new(InMemoryUserRepository::new()))
}

pub async fn request_raw(
  app: Router,
  method: Method,
  uri: &str,
  body: Option<String>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let request = match body {
    Some(body) => {
      builder = builder.header("content-type", "application/json");
      builder.body(Body::from(body)).expect("build request")
    }
    None => builder.body(Body::empty()).expect("build request"),
  };

  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  let value = serde_json::from_slice(&bytes).expect("parse response body");

  (status, value)
}

pub async fn request_json(
  app: Router,
  method: Method,
  uri: &str,
  body: Option<&Value>,
) -> (StatusCode, Value) {
  let body = body.map(|v| serde_json::to_string(v).expect("serialize request body"));
  request_raw(app, method, uri, body).await
}
