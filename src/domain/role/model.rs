use std::fmt;

use crate::domain::Permission;

/// Role model
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub is_default: bool,
    pub permissions: Permission,
}

impl Role {
    pub fn grants(&self, required: Permission) -> bool {
        self.permissions.grants(required)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Role {:?}>", self.name)
    }
}

/// Desired state of a built-in role
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleSeed {
    pub name: &'static str,
    pub permissions: Permission,
    pub is_default: bool,
}

/// The roles every installation starts with. Exactly one is the default.
pub const BUILTIN_ROLES: [RoleSeed; 3] = [
    RoleSeed {
        name: "User",
        permissions: Permission::USER_DEFAULT,
        is_default: true,
    },
    RoleSeed {
        name: "Moderator",
        permissions: Permission::MODERATOR_DEFAULT,
        is_default: false,
    },
    RoleSeed {
        name: "Administrator",
        permissions: Permission::ADMIN_MASK,
        is_default: false,
    },
];
