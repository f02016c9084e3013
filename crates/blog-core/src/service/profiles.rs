use chrono::Utc;

use super::BlogService;
use crate::domain::{ProfileChanges, User, Viewer};
use crate::error::DomainError;
use crate::policy;
use crate::validation;

impl BlogService {
    /// The logged-in user's own account.
    pub async fn current_profile(&self, viewer: &Viewer) -> Result<User, DomainError> {
        let user_id = policy::require_login(viewer)?;
        self.repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", user_id))
    }

    pub async fn update_profile(
        &self,
        viewer: &Viewer,
        changes: ProfileChanges,
    ) -> Result<User, DomainError> {
        let mut user = self.current_profile(viewer).await?;
        validation::validate_profile(&changes)?;

        if changes.username != user.username {
            self.ensure_username_free(&changes.username)
                .await
                .map_err(|e| match e {
                    DomainError::Duplicate(_) => DomainError::invalid(
                        "username",
                        "A user with that username already exists",
                    ),
                    other => other,
                })?;
        }

        if changes.email != user.email {
            tracing::info!(
                user_id = user.id,
                old_email = %validation::mask_email(&user.email),
                new_email = %validation::mask_email(&changes.email),
                "Email changed"
            );
        }

        user.username = changes.username;
        user.email = changes.email;
        user.first_name = changes.first_name;
        user.last_name = changes.last_name;
        user.updated_at = Utc::now();

        let user = self.repos.users.save(user).await?;
        tracing::info!(user_id = user.id, "Profile updated");
        Ok(user)
    }

    /// Persist a new account. The password must already be hashed.
    pub async fn register_user(
        &self,
        username: String,
        email: String,
        password_hash: String,
    ) -> Result<User, DomainError> {
        self.ensure_username_free(&username).await?;

        let user = self
            .repos
            .users
            .save(User::new(username, email, password_hash))
            .await?;
        tracing::info!(
            user_id = user.id,
            email = %validation::mask_email(&user.email),
            "User registered"
        );
        Ok(user)
    }

    pub async fn find_user(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self.repos.users.find_by_username(username).await?)
    }

    async fn ensure_username_free(&self, username: &str) -> Result<(), DomainError> {
        if self.repos.users.find_by_username(username).await?.is_some() {
            return Err(DomainError::Duplicate(format!(
                "Username '{username}' is already taken"
            )));
        }
        Ok(())
    }
}
