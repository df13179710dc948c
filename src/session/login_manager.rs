use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{AnonymousUser, CurrentUser, DomainResult, Principal, User};

/// Resolves a stored user id to an account.
#[async_trait]
pub trait UserLoader: Send + Sync {
    async fn load_user(&self, id: i32) -> DomainResult<Option<User>>;
}

#[async_trait]
impl<L: UserLoader + ?Sized> UserLoader for Arc<L> {
    async fn load_user(&self, id: i32) -> DomainResult<Option<User>> {
        (**self).load_user(id).await
    }
}

/// Turns session identifiers into principals.
///
/// The loader is injected here; nothing is registered globally.
pub struct LoginManager<L> {
    loader: L,
}

impl<L: UserLoader> LoginManager<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Principal for `session_id`. Missing, malformed and unknown ids all
    /// resolve to the anonymous user; store failures are returned.
    pub async fn current_user(&self, session_id: Option<&str>) -> DomainResult<CurrentUser> {
        let Some(raw) = session_id else {
            return Ok(CurrentUser::Anonymous(AnonymousUser));
        };

        let Ok(id) = raw.trim().parse::<i32>() else {
            debug!(session_id = raw, "Ignoring malformed session id");
            return Ok(CurrentUser::Anonymous(AnonymousUser));
        };

        match self.loader.load_user(id).await? {
            Some(user) => Ok(CurrentUser::Authenticated(user)),
            None => {
                debug!(user_id = id, "Session refers to a missing user");
                Ok(CurrentUser::Anonymous(AnonymousUser))
            }
        }
    }

    /// Value to store in the session after a successful login.
    pub fn session_id(&self, principal: &dyn Principal) -> Option<String> {
        principal.id().map(|id| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::model::test_user;
    use crate::domain::{DomainError, Permission};

    struct OneUser;

    #[async_trait]
    impl UserLoader for OneUser {
        async fn load_user(&self, id: i32) -> DomainResult<Option<User>> {
            Ok((id == 1).then(|| test_user(None)))
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl UserLoader for BrokenStore {
        async fn load_user(&self, _id: i32) -> DomainResult<Option<User>> {
            Err(DomainError::Storage("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_resolves_known_user() {
        let manager = LoginManager::new(OneUser);
        let current = manager.current_user(Some("1")).await.unwrap();
        assert!(current.is_authenticated());
        assert_eq!(current.user().map(|u| u.username.as_str()), Some("john"));
    }

    #[tokio::test]
    async fn test_falls_back_to_anonymous() {
        let manager = LoginManager::new(Arc::new(OneUser));
        for session_id in [None, Some("2"), Some("abc"), Some("")] {
            let current = manager.current_user(session_id).await.unwrap();
            assert!(current.is_anonymous(), "{:?}", session_id);
            assert!(!current.can(Permission::empty()));
        }
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let manager = LoginManager::new(BrokenStore);
        assert!(manager.current_user(Some("1")).await.is_err());
        assert!(manager.current_user(None).await.is_ok());
    }

    #[test]
    fn test_session_id() {
        let manager = LoginManager::new(OneUser);
        let user = test_user(None);
        assert_eq!(manager.session_id(&user), Some("1".to_string()));
        assert_eq!(manager.session_id(&AnonymousUser), None);
    }
}
