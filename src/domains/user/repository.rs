use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::model::User;

/// Store failures as seen by the service layer. Uniqueness violations are
/// split out so callers can tell a conflict from any other database error.
#[derive(Debug, Clone, PartialEq)]
pub enum RepositoryError {
  Conflict(String),
  Database(String),
}

impl std::fmt::Display for RepositoryError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      RepositoryError::Conflict(msg) => write!(f, "{}", msg),
      RepositoryError::Database(msg) => write!(f, "{}", msg),
    }
  }
}

impl std::error::Error for RepositoryError {}

impl From<sqlx::Error> for RepositoryError {
  fn from(err: sqlx::Error) -> Self {
    if let sqlx::Error::Database(db_err) = &err {
      // 23505 is the Postgres unique_violation code.
      if db_err.code().as_deref() == Some("23505") {
        return RepositoryError::Conflict("Username or email already exists".to_string());
      }
    }
    tracing::error!("database error: {err}");
    RepositoryError::Database(format!("Database error: {}", err))
  }
}

/// CRUD surface of the `users` table. All SQL execution lives behind this
/// trait; handlers and the service never build statements themselves.
#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn create(
    &self,
    username: &str,
    email: &str,
    password_hash: &str,
    first_name: &str,
    last_name: &str,
  ) -> Result<Uuid, RepositoryError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

  async fn list_all(&self) -> Result<Vec<User>, RepositoryError>;

  /// Updates the supplied fields and always refreshes `updated_at`. An
  /// empty string leaves that column unchanged. Returns whether a row with
  /// this id existed.
  async fn update(
    &self,
    id: Uuid,
    username: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
  ) -> Result<bool, RepositoryError>;

  async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

const SELECT_USER_COLUMNS: &str = "SELECT id, username, email, password_hash, \
   COALESCE(first_name, '') AS first_name, COALESCE(last_name, '') AS last_name, \
   created_at, updated_at FROM users";

pub struct SqlxUserRepository {
  pool: PgPool,
}

impl SqlxUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
  async fn create(
    &self,
    username: &str,
    email: &str,
    password_hash: &str,
    first_name: &str,
    last_name: &str,
  ) -> Result<Uuid, RepositoryError> {
    let (id,): (Uuid,) = sqlx::query_as(
      "INSERT INTO users (username, email, password_hash, first_name, last_name) \
       VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .fetch_one(&self.pool)
    .await?;

    Ok(id)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
    let user = sqlx::query_as::<_, User>(&format!("{} WHERE id = $1", SELECT_USER_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;

    Ok(user)
  }

  async fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
    let users = sqlx::query_as::<_, User>(&format!(
      "{} ORDER BY created_at DESC",
      SELECT_USER_COLUMNS
    ))
    .fetch_all(&self.pool)
    .await?;

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
    // NULLIF turns the empty-string sentinel into NULL so COALESCE keeps
    // the stored value; updated_at is refreshed unconditionally.
    let result = sqlx::query(
      "UPDATE users SET \
         username = COALESCE(NULLIF($2, ''), username), \
         email = COALESCE(NULLIF($3, ''), email), \
         first_name = COALESCE(NULLIF($4, ''), first_name), \
         last_name = COALESCE(NULLIF($5, ''), last_name), \
         updated_at = CURRENT_TIMESTAMP \
       WHERE id = $1",
    )
    .bind(id)
    .bind(username)
    .bind(email)
    .bind(first_name)
    .bind(last_name)
    .execute(&self.pool)
    .await?;

    Ok(result.rows_affected() == 1)
  }

  async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected() > 0)
  }
}
