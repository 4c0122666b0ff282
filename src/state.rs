use std::sync::Arc;

use crate::domains::user::{
  model::{CreateUserRequest, CreateUserResponse, UpdateUserRequest, UpdateUserResponse, User},
  repository::UserRepository,
  service::{UserService, UserServiceError, UserServiceImpl},
};

/// The capability surface handlers depend on. Keeping this a trait lets
/// tests drive the real router against an in-memory store.
pub trait AppState: Clone + Send + Sync + 'static {
  fn create_user(
    &self,
    req: CreateUserRequest,
  ) -> impl std::future::Future<Output = Result<CreateUserResponse, UserServiceError>> + Send;
  fn get_user(
    &self,
    id: &str,
  ) -> impl std::future::Future<Output = Result<User, UserServiceError>> + Send;
  fn list_users(
    &self,
  ) -> impl std::future::Future<Output = Result<Vec<User>, UserServiceError>> + Send;
  fn update_user(
    &self,
    id: &str,
    req: UpdateUserRequest,
  ) -> impl std::future::Future<Output = Result<UpdateUserResponse, UserServiceError>> + Send;
  fn delete_user(
    &self,
    id: &str,
  ) -> impl std::future::Future<Output = Result<(), UserServiceError>> + Send;
}

/// Application state built once at startup and injected into the router.
pub struct SharedAppState<R: UserRepository> {
  pub user_service: Arc<UserServiceImpl<R>>,
}

impl<R: UserRepository> Clone for SharedAppState<R> {
  fn clone(&self) -> Self {
    Self {
      user_service: Arc::clone(&self.user_service),
    }
  }
}

impl<R: UserRepository> SharedAppState<R> {
  pub fn new(repository: R) -> Self {
    Self {
      user_service: Arc::new(UserServiceImpl::new(repository)),
    }
  }
}

impl<R: UserRepository + 'static> AppState for SharedAppState<R> {
  async fn create_user(&self, req: CreateUserRequest) -> Result<CreateUserResponse, UserServiceError> {
    self.user_service.create_user(req).await
  }

  async fn get_user(&self, id: &str) -> Result<User, UserServiceError> {
    self.user_service.get_user(id).await
  }

  async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
    self.user_service.list_users().await
  }

  async fn update_user(
    &self,
    id: &str,
    req: UpdateUserRequest,
  ) -> Result<UpdateUserResponse, UserServiceError> {
    self.user_service.update_user(id, req).await
  }

  async fn delete_user(&self, id: &str) -> Result<(), UserServiceError> {
    self.user_service.delete_user(id).await
  }
}
