use async_trait::async_trait;
use uuid::Uuid;

use super::{
  model::{CreateUserRequest, CreateUserResponse, UpdateUserRequest, UpdateUserResponse, User},
  repository::{RepositoryError, UserRepository},
};

#[derive(Debug)]
pub enum UserServiceError {
  NotFound(String),
  Conflict(String),
  Store(String),
}

impl std::error::Error for UserServiceError {}

impl std::fmt::Display for UserServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      UserServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
      UserServiceError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      UserServiceError::Store(msg) => write!(f, "Store Error: {}", msg),
    }
  }
}

impl From<RepositoryError> for UserServiceError {
  fn from(err: RepositoryError) -> Self {
    match err {
      RepositoryError::Conflict(msg) => UserServiceError::Conflict(msg),
      RepositoryError::Database(msg) => UserServiceError::Store(msg),
    }
  }
}

#[async_trait]
pub trait UserService: Send + Sync {
  async fn create_user(&self, req: CreateUserRequest) -> Result<CreateUserResponse, UserServiceError>;
  async fn get_user(&self, id: &str) -> Result<User, UserServiceError>;
  async fn list_users(&self) -> Result<Vec<User>, UserServiceError>;
  async fn update_user(&self, id: &str, req: UpdateUserRequest)
    -> Result<UpdateUserResponse, UserServiceError>;
  async fn delete_user(&self, id: &str) -> Result<(), UserServiceError>;
}

pub struct UserServiceImpl<R> {
  repository: R,
}

impl<R> UserServiceImpl<R>
where
  R: UserRepository,
{
  pub fn new(repository: R) -> Self {
    Self { repository }
  }
}

/// A path id that is not a well-formed UUID is a store-level failure,
/// not a missing row.
fn parse_user_id(id: &str) -> Result<Uuid, UserServiceError> {
  Uuid::parse_str(id).map_err(|_| UserServiceError::Store(format!("invalid user id: {}", id)))
}

#[async_trait]
impl<R> UserService for UserServiceImpl<R>
where
  R: UserRepository,
{
  async fn create_user(&self, req: CreateUserRequest) -> Result<CreateUserResponse, UserServiceError> {
    let password_hash = crate::utils::hash_password(&req.password);

    let id = self
      .repository
      .create(&req.username, &req.email, &password_hash, &req.first_name, &req.last_name)
      .await?;

    Ok(CreateUserResponse {
      id,
      username: req.username,
      email: req.email,
    })
  }

  async fn get_user(&self, id: &str) -> Result<User, UserServiceError> {
    let id = parse_user_id(id)?;

    self
      .repository
      .find_by_id(id)
      .await?
      .ok_or_else(|| UserServiceError::NotFound("User not found".to_string()))
  }

  async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
    Ok(self.repository.list_all().await?)
  }

  async fn update_user(
    &self,
    id: &str,
    req: UpdateUserRequest,
  ) -> Result<UpdateUserResponse, UserServiceError> {
    let user_id = parse_user_id(id)?;

    let updated = self
      .repository
      .update(user_id, &req.username, &req.email, &req.first_name, &req.last_name)
      .await?;

    if !updated {
      return Err(UserServiceError::NotFound("User not found".to_string()));
    }

    let user = self
      .repository
      .find_by_id(user_id)
      .await?
      .ok_or_else(|| UserServiceError::NotFound("User not found".to_string()))?;

    Ok(UpdateUserResponse {
      id: user.id,
      username: user.username,
      email: user.email,
      first_name: user.first_name,
      last_name: user.last_name,
      updated_at: user.updated_at,
    })
  }

  async fn delete_user(&self, id: &str) -> Result<(), UserServiceError> {
    let id = parse_user_id(id)?;

    if !self.repository.delete(id).await? {
      return Err(UserServiceError::NotFound("User not found".to_string()));
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_support::InMemoryUserRepository;
  use std::time::Duration;

  fn service() -> UserServiceImpl<InMemoryUserRepository> {
    UserServiceImpl::new(InMemoryUserRepository::new())
  }

  fn create_req(username: &str, email: &str) -> CreateUserRequest {
    CreateUserRequest {
      username: username.to_string(),
      email: email.to_string(),
      password: "123456".to_string(),
      first_name: String::new(),
      last_name: String::new(),
    }
  }

  #[tokio::test]
  async fn create_then_get_round_trips() {
    let service = service();
    let created = service.create_user(create_req("alice", "alice@example.com")).await.unwrap();
    assert_eq!(created.username, "alice");

    let user = service.get_user(&created.id.to_string()).await.unwrap();
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.password_hash, crate::utils::hash_password("123456"));
  }

  #[tokio::test]
  async fn create_duplicate_email_is_conflict() {
    let service = service();
    service.create_user(create_req("alice", "shared@example.com")).await.unwrap();

    let result = service.create_user(create_req("bob", "shared@example.com")).await;
    assert!(matches!(result, Err(UserServiceError::Conflict(_))));

    assert_eq!(service.list_users().await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn get_missing_user_is_not_found() {
    let service = service();
    let result = service.get_user(&Uuid::new_v4().to_string()).await;
    assert!(matches!(result, Err(UserServiceError::NotFound(_))));
  }

  #[tokio::test]
  async fn malformed_id_is_a_store_error() {
    let service = service();
    let result = service.get_user("not-a-uuid").await;
    assert!(matches!(result, Err(UserServiceError::Store(_))));
  }

  #[tokio::test]
  async fn update_empty_username_leaves_it_unchanged() {
    let service = service();
    let created = service.create_user(create_req("alice", "alice@example.com")).await.unwrap();
    let id = created.id.to_string();
    let before = service.get_user(&id).await.unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;

    let req = UpdateUserRequest {
      first_name: "Ada".to_string(),
      ..Default::default()
    };
    let updated = service.update_user(&id, req).await.unwrap();

    assert_eq!(updated.username, "alice");
    assert_eq!(updated.first_name, "Ada");
    assert!(updated.updated_at > before.updated_at);
  }

  #[tokio::test]
  async fn update_with_no_fields_still_refreshes_updated_at() {
    let service = service();
    let created = service.create_user(create_req("alice", "alice@example.com")).await.unwrap();
    let id = created.id.to_string();
    let before = service.get_user(&id).await.unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;

    let updated = service.update_user(&id, UpdateUserRequest::default()).await.unwrap();
    assert_eq!(updated.username, "alice");
    assert!(updated.updated_at > before.updated_at);
  }

  #[tokio::test]
  async fn update_missing_user_is_not_found() {
    let service = service();
    let result = service
      .update_user(&Uuid::new_v4().to_string(), UpdateUserRequest::default())
      .await;
    assert!(matches!(result, Err(UserServiceError::NotFound(_))));
  }

  #[tokio::test]
  async fn update_to_taken_email_is_conflict() {
    let service = service();
    service.create_user(create_req("alice", "alice@example.com")).await.unwrap();
    let bob = service.create_user(create_req("bob", "bob@example.com")).await.unwrap();

    let req = UpdateUserRequest {
      email: "alice@example.com".to_string(),
      ..Default::default()
    };
    let result = service.update_user(&bob.id.to_string(), req).await;
    assert!(matches!(result, Err(UserServiceError::Conflict(_))));
  }

  #[tokio::test]
  async fn delete_is_idempotent_in_outcome_only() {
    let service = service();
    let created = service.create_user(create_req("alice", "alice@example.com")).await.unwrap();
    let id = created.id.to_string();

    service.delete_user(&id).await.unwrap();
    let second = service.delete_user(&id).await;
    assert!(matches!(second, Err(UserServiceError::NotFound(_))));
  }

  #[tokio::test]
  async fn delete_missing_user_leaves_list_unchanged() {
    let service = service();
    service.create_user(create_req("alice", "alice@example.com")).await.unwrap();

    let result = service.delete_user(&Uuid::new_v4().to_string()).await;
    assert!(matches!(result, Err(UserServiceError::NotFound(_))));
    assert_eq!(service.list_users().await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn list_returns_most_recent_first() {
    let service = service();
    service.create_user(create_req("first", "first@example.com")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    service.create_user(create_req("second", "second@example.com")).await.unwrap();

    let users = service.list_users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username, "second");
    assert_eq!(users[1].username, "first");
  }
}
