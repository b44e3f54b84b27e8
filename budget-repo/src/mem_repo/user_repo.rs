use crate::mem_repo::State;
use crate::user_repo::{User, UserRepo, UserRepoError};
use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub struct MemUserRepo {
    state: Arc<RwLock<State>>,
}

impl MemUserRepo {
    pub fn new(state: Arc<RwLock<State>>) -> MemUserRepo {
        MemUserRepo { state }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }
}

#[async_trait]
impl UserRepo for MemUserRepo {
    async fn get_user(&self, user_id: &str) -> Result<User, UserRepoError> {
        let read_guard = self.read_lock()?;

        read_guard
            .users
            .get(user_id)
            .cloned()
            .ok_or_else(|| UserRepoError::UserNotFound(user_id.to_owned()))
    }

    async fn create_user(&self, user: User) -> Result<(), UserRepoError> {
        let mut write_guard = self.write_lock()?;

        if write_guard.users.contains_key(&user.id) {
            return Err(UserRepoError::UserAlreadyExists(user.id));
        }
        write_guard.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), UserRepoError> {
        let mut write_guard = self.write_lock()?;

        write_guard
            .users
            .remove(user_id)
            .map(|_| ())
            .ok_or_else(|| UserRepoError::UserNotFound(user_id.to_owned()))
    }
}
