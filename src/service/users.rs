use crate::auth::Hasher;
use crate::db::{self, Storage, User};
use crate::error::DashError;
use crate::service::{apply_text, non_empty, on_unique_violation};
use crate::types::{CreateUserRequest, UpdateUserRequest};
use tracing::info;

#[derive(Clone)]
pub struct UserService {
    storage: Storage,
    hasher: Hasher,
}

impl UserService {
    pub fn new(storage: Storage, hasher: Hasher) -> Self {
        Self { storage, hasher }
    }

    pub async fn create(&self, req: CreateUserRequest) -> Result<User, DashError> {
        if self.storage.find_user_by_email(&req.email).await?.is_some() {
            return Err(DashError::DuplicateEmail(req.email));
        }
        let password_hash = self.hasher.hash(&req.password)?;
        let user = self
            .storage
            .insert_user(&req.email, &password_hash, &req.name, db::now())
            .await
            .map_err(|e| on_unique_violation(e, DashError::DuplicateEmail(req.email.clone())))?;
        info!(user_id = user.id, "user created");
        Ok(user)
    }

    pub async fn get(&self, id: i64) -> Result<User, DashError> {
        self.storage
            .get_user(id)
            .await?
            .ok_or(DashError::NotFound("user"))
    }

    pub async fn list(&self) -> Result<Vec<User>, DashError> {
        Ok(self.storage.list_users().await?)
    }

    pub async fn update(&self, id: i64, req: UpdateUserRequest) -> Result<User, DashError> {
        let mut user = self.get(id).await?;

        if let Some(email) = non_empty(req.email) {
            if let Some(other) = self.storage.find_user_by_email(&email).await?
                && other.id != id
            {
                return Err(DashError::DuplicateEmail(email));
            }
            user.email = email;
        }
        apply_text(&mut user.name, req.name);

        let email = user.email.clone();
        self.storage
            .update_user(&user, db::now())
            .await
            .map_err(|e| on_unique_violation(e, DashError::DuplicateEmail(email)))?
            .ok_or(DashError::NotFound("user"))
    }

    /// The user's sessions are removed with the row.
    pub async fn delete(&self, id: i64) -> Result<(), DashError> {
        if self.storage.delete_user(id).await? == 0 {
            return Err(DashError::NotFound("user"));
        }
        info!(user_id = id, "user deleted");
        Ok(())
    }
}
