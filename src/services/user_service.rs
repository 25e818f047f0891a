use std::sync::Arc;

use tracing::{info, warn};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::models::{NewUser, User};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        if user.name.as_deref().is_none_or(str::is_empty) {
            warn!("rejected user without name");
            return Err(AppError::Validation("name required".to_string()));
        }

        let created = self.users.save(&user).await?;
        info!("created user {}", created.id);
        Ok(created)
    }

    pub async fn find_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.find_all().await?)
    }
}
