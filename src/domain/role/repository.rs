use async_trait::async_trait;

use super::{Role, RoleSeed};
use crate::domain::{DomainResult, Permission};

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Role>>;
    /// First role flagged as default, if any.
    async fn find_default(&self) -> DomainResult<Option<Role>>;
    /// First role whose mask equals `permissions` exactly.
    async fn find_by_permissions(&self, permissions: Permission) -> DomainResult<Option<Role>>;
    async fn list_roles(&self) -> DomainResult<Vec<Role>>;

    /// Create or update each seeded role by name inside a single transaction.
    async fn upsert_roles(&self, seeds: &[RoleSeed]) -> DomainResult<()>;
}
