//! In-memory user store

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::{
    error::{AppError, AppResult},
    models::user::User,
};

#[derive(Clone, Default)]
pub struct UsersRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl UsersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, user: User) -> AppResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AppError::Internal("User store lock poisoned".to_string()))?;

        if users.contains_key(&user.username) {
            return Err(AppError::DuplicateKey(format!(
                "Username {} already exists",
                user.username
            )));
        }
        users.insert(user.username.clone(), user);
        Ok(())
    }

    pub fn get_by_username(&self, username: &str) -> AppResult<User> {
        self.users
            .read()
            .map_err(|_| AppError::Internal("User store lock poisoned".to_string()))?
            .get(username)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))
    }
}
