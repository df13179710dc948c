//! Account service — application-layer orchestration
//!
//! All account-related business logic lives here. Callers outside the
//! crate should go through this service rather than the repositories.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use validator::Validate;

use crate::domain::user::build_new_user;
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, RepositoryProvider, UpdateProfileDto, User,
    BUILTIN_ROLES,
};
use crate::session::UserLoader;

/// Account service — orchestrates all identity / account use-cases.
pub struct AccountService {
    repos: Arc<dyn RepositoryProvider>,
    admin_email: Option<String>,
}

impl AccountService {
    /// `admin_email` is the address that receives the administrator role
    /// on registration.
    pub fn new(repos: Arc<dyn RepositoryProvider>, admin_email: Option<String>) -> Self {
        Self { repos, admin_email }
    }

    // ── Bootstrap ───────────────────────────────────────────────

    /// Create or refresh the built-in roles. Safe to run repeatedly.
    ///
    /// Must run before the first registration, otherwise new accounts
    /// get no role.
    pub async fn insert_roles(&self) -> DomainResult<()> {
        self.repos.roles().upsert_roles(&BUILTIN_ROLES).await
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new account. The role comes from the DTO, the admin
    /// address, or the default role, in that order.
    pub async fn register(&self, dto: CreateUserDto) -> DomainResult<User> {
        // emails always contain '@', so login names can never collide with them
        if dto.username.contains('@') {
            return Err(DomainError::Validation("Username must not contain '@'".into()));
        }

        let users = self.repos.users();

        if users.get_user_by_email(&dto.email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".into()));
        }
        if users.get_user_by_username(&dto.username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".into()));
        }

        let new_user = build_new_user(dto, self.admin_email.as_deref(), self.repos.roles()).await?;
        let user = users.insert_user(new_user).await?;

        info!(
            user_id = user.id,
            username = %user.username,
            role = user.role.as_ref().map(|r| r.name.as_str()).unwrap_or("none"),
            "New user registered"
        );
        Ok(user)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check credentials. Accepts either the email or the username; a
    /// login containing '@' is only ever matched against emails.
    pub async fn authenticate(&self, email_or_username: &str, password: &str) -> DomainResult<User> {
        let users = self.repos.users();
        let user = if email_or_username.contains('@') {
            users.get_user_by_email(email_or_username).await?
        } else {
            users.get_user_by_username(email_or_username).await?
        };

        let Some(user) = user else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !user.verify_password(password) {
            debug!(user_id = user.id, "Password mismatch");
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn load_user(&self, id: i32) -> DomainResult<Option<User>> {
        self.repos.users().get_user_by_id(id).await
    }

    /// Users holding the named role.
    pub async fn members_of(&self, role_name: &str) -> DomainResult<Vec<User>> {
        let role = self
            .repos
            .roles()
            .find_by_name(role_name)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Role",
                field: "name",
                value: role_name.to_string(),
            })?;

        self.repos.users().list_users_by_role(role.id).await
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Record activity and persist the new `last_seen`.
    pub async fn ping(&self, user: &mut User) -> DomainResult<()> {
        user.ping();
        self.repos
            .users()
            .update_last_seen(user.id, user.last_seen)
            .await
    }

    /// Change a user's password. Verifies the current password first.
    pub async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if new_password.is_empty() {
            return Err(DomainError::Validation("New password must not be empty".into()));
        }

        let mut user = self
            .repos
            .users()
            .get_user_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })?;

        if !user.verify_password(current_password) {
            return Err(DomainError::Unauthorized("Invalid current password".into()));
        }

        user.set_password(new_password)?;
        let hash = user
            .password_hash()
            .ok_or_else(|| DomainError::Validation("Password hash missing".into()))?;
        self.repos.users().update_password_hash(user_id, hash).await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    /// Edit the free-text profile fields.
    pub async fn update_profile(&self, user_id: i32, dto: UpdateProfileDto) -> DomainResult<User> {
        dto.validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;

        self.repos
            .users()
            .update_profile(user_id, dto)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })
    }
}

#[async_trait]
impl UserLoader for AccountService {
    async fn load_user(&self, id: i32) -> DomainResult<Option<User>> {
        AccountService::load_user(self, id).await
    }
}
