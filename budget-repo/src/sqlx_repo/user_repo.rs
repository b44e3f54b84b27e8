use crate::sqlx_repo::SQLxRepo;
use crate::user_repo::{User, UserRepo, UserRepoError};
use anyhow::Context;
use async_trait::async_trait;
use sqlx::{query, query_as};
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct UserEntry {
    id: String,
    name: String,
    email: String,
    password_hash: String,
}

impl From<UserEntry> for User {
    fn from(value: UserEntry) -> Self {
        User::new(value.id, value.name, value.email, value.password_hash)
    }
}

#[async_trait]
impl UserRepo for SQLxRepo {
    #[instrument(skip(self))]
    async fn get_user(&self, user_id: &str) -> Result<User, UserRepoError> {
        let user: Option<UserEntry> =
            query_as("SELECT id, name, email, password_hash FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get user {}", user_id))?;
        user.map(|u| u.into())
            .ok_or_else(|| UserRepoError::UserNotFound(user_id.to_owned()))
    }

    #[instrument(skip(self, user))]
    async fn create_user(&self, user: User) -> Result<(), UserRepoError> {
        let result = query(
            "INSERT INTO users(id, name, email, password_hash) VALUES($1, $2, $3, $4) \
             ON CONFLICT DO NOTHING",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Unable to create user {}", user.id))?;
        if result.rows_affected() == 1 {
            Ok(())
        } else {
            Err(UserRepoError::UserAlreadyExists(user.id))
        }
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, user_id: &str) -> Result<(), UserRepoError> {
        let result = query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Unable to delete user {}", user_id))?;
        if result.rows_affected() == 1 {
            Ok(())
        } else {
            Err(UserRepoError::UserNotFound(user_id.to_owned()))
        }
    }
}
