//! Builds unsaved users and derives their role.
//!
//! Role defaulting lives here rather than in the entity so that store
//! access and configuration are explicit parameters.

use tracing::{debug, warn};
use validator::Validate;

use super::{CreateUserDto, NewUser};
use crate::domain::{DomainError, DomainResult, Permission, Role, RoleRepository};

/// Pick the role for a new account that was not given one.
///
/// The configured admin address gets the role whose mask is exactly
/// [`Permission::ADMIN_MASK`]; everyone else, or the admin when no such
/// role exists, gets the default role. `None` means roles were never seeded.
pub async fn resolve_role(
    email: &str,
    admin_email: Option<&str>,
    roles: &dyn RoleRepository,
) -> DomainResult<Option<Role>> {
    if admin_email.is_some_and(|admin| admin == email) {
        if let Some(role) = roles.find_by_permissions(Permission::ADMIN_MASK).await? {
            debug!(email, role = %role.name, "Admin address matched");
            return Ok(Some(role));
        }
    }

    roles.find_default().await
}

/// Validate `dto`, hash its password and resolve its role.
pub async fn build_new_user(
    dto: CreateUserDto,
    admin_email: Option<&str>,
    roles: &dyn RoleRepository,
) -> DomainResult<NewUser> {
    dto.validate()
        .map_err(|e| DomainError::Validation(e.to_string()))?;

    let role = match dto.role {
        Some(role) => Some(role),
        None => resolve_role(&dto.email, admin_email, roles).await?,
    };

    if role.is_none() {
        warn!(
            email = %dto.email,
            "No default role found; account created without a role. Seed roles first."
        );
    }

    let mut user = NewUser::new(dto.email, dto.username);
    user.set_password(&dto.password)?;
    user.role = role;
    user.name = dto.name;
    user.location = dto.location;
    Ok(user)
}
