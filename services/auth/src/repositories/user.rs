//! User repository for database operations

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::{NewUser, User};

/// Failure to insert a user record
#[derive(Error, Debug)]
pub enum CreateUserError {
    #[error("email {0} already exists")]
    DuplicateEmail(String),

    #[error("username {0} already exists")]
    DuplicateUsername(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Persistent store of user records
///
/// Implementations must keep `email` and `username` unique.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Create a new user, rejecting a taken email or username
    async fn create(&self, new_user: &NewUser) -> Result<User, CreateUserError>;
}

/// Names PostgreSQL gives the UNIQUE constraints in `0001_create_users.sql`
const EMAIL_CONSTRAINT: &str = "users_email_key";
const USERNAME_CONSTRAINT: &str = "users_username_key";

const USER_COLUMNS: &str =
    "id, username, email, password_hash, image, favorites, created_at, updated_at";

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        info!("Finding user by ID: {}", id);

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        info!("Finding user by email: {}", email);

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        info!("Finding user by username: {}", username);

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, CreateUserError> {
        info!("Creating new user: {}", new_user.username);

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, image)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| duplicate_or_other(e, new_user))?;

        Ok(user)
    }
}

fn duplicate_or_other(err: sqlx::Error, new_user: &NewUser) -> CreateUserError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(EMAIL_CONSTRAINT) => {
                    return CreateUserError::DuplicateEmail(new_user.email.clone());
                }
                Some(USERNAME_CONSTRAINT) => {
                    return CreateUserError::DuplicateUsername(new_user.username.clone());
                }
                _ => {}
            }
        }
    }

    CreateUserError::Other(err.into())
}
