use std::sync::Mutex;

use async_trait::async_trait;

use super::UserStore;
use crate::models::User;
use crate::utils::AppError;

/// In-memory stand-in for the `users` collection.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    fail: bool,
}

impl MemoryUserStore {
    /// A store whose every operation returns a database error
    pub fn failing() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            fail: false,
        }
    }

    pub fn count_with_id(&self, id: &str) -> usize {
        self.users.lock().unwrap().iter().filter(|u| u.id == id).count()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_credentials(&self, id: &str, password: &str) -> Result<Vec<User>, AppError> {
        if self.fail {
            return Err(AppError::DatabaseError("simulated failure".to_string()));
        }

        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.id == id && u.password == password)
            .cloned()
            .collect())
    }

    async fn insert_user(&self, user: &User) -> Result<usize, AppError> {
        if self.fail {
            return Err(AppError::DatabaseError("simulated failure".to_string()));
        }

        self.users.lock().unwrap().push(user.clone());
        Ok(1)
    }
}
