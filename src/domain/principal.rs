//! Capability queries shared by signed-in and anonymous visitors.

use super::{Permission, User};

/// Anything a permission check can be asked of.
pub trait Principal {
    fn can(&self, permissions: Permission) -> bool;

    fn is_administrator(&self) -> bool {
        self.can(Permission::ADMINISTER)
    }

    fn is_authenticated(&self) -> bool;

    fn is_anonymous(&self) -> bool {
        !self.is_authenticated()
    }

    /// Identifier stored in the session, if any.
    fn id(&self) -> Option<i32>;
}

impl Principal for User {
    fn can(&self, permissions: Permission) -> bool {
        User::can(self, permissions)
    }

    fn is_administrator(&self) -> bool {
        User::is_administrator(self)
    }

    fn is_authenticated(&self) -> bool {
        true
    }

    fn id(&self) -> Option<i32> {
        Some(self.id)
    }
}

/// Visitor without an account. Every capability check is refused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnonymousUser;

impl Principal for AnonymousUser {
    fn can(&self, _permissions: Permission) -> bool {
        false
    }

    fn is_administrator(&self) -> bool {
        false
    }

    fn is_authenticated(&self) -> bool {
        false
    }

    fn id(&self) -> Option<i32> {
        None
    }
}

/// The principal behind the current request.
#[derive(Clone, Debug)]
pub enum CurrentUser {
    Authenticated(User),
    Anonymous(AnonymousUser),
}

impl CurrentUser {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous(_) => None,
        }
    }

    pub fn into_user(self) -> Option<User> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous(_) => None,
        }
    }

    fn principal(&self) -> &dyn Principal {
        match self {
            Self::Authenticated(user) => user,
            Self::Anonymous(anonymous) => anonymous,
        }
    }
}

impl Default for CurrentUser {
    fn default() -> Self {
        Self::Anonymous(AnonymousUser)
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self::Authenticated(user)
    }
}

impl Principal for CurrentUser {
    fn can(&self, permissions: Permission) -> bool {
        self.principal().can(permissions)
    }

    fn is_administrator(&self) -> bool {
        self.principal().is_administrator()
    }

    fn is_authenticated(&self) -> bool {
        self.principal().is_authenticated()
    }

    fn id(&self) -> Option<i32> {
        self.principal().id()
    }
}
