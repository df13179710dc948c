use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{NewUser, UpdateProfileDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> DomainResult<User>;

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    /// Users bound to a role, ordered by id.
    async fn list_users_by_role(&self, role_id: i32) -> DomainResult<Vec<User>>;

    async fn update_last_seen(&self, id: i32, last_seen: DateTime<Utc>) -> DomainResult<()>;
    async fn update_password_hash(&self, id: i32, password_hash: &str) -> DomainResult<()>;
    async fn update_profile(&self, id: i32, dto: UpdateProfileDto) -> DomainResult<Option<User>>;
}
