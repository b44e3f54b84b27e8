use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[async_trait]
pub trait UserRepo: Sync + Send {
    async fn get_user(&self, user_id: &str) -> Result<User, UserRepoError>;
    async fn create_user(&self, user: User) -> Result<(), UserRepoError>;
    async fn delete_user(&self, user_id: &str) -> Result<(), UserRepoError>;
}

#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    pub const fn new(id: String, name: String, email: String, password_hash: String) -> User {
        User {
            id,
            name,
            email,
            password_hash,
        }
    }

    /// The sanitized projection exposed when a user reference is expanded.
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Error, Debug)]
pub enum UserRepoError {
    #[error("User {0} not found")]
    UserNotFound(String),
    #[error("User {0} already exists")]
    UserAlreadyExists(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
