use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult, Permission, Role};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// User model
#[derive(Clone, Debug)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub(crate) password_hash: Option<String>,
    pub role: Option<Role>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub member_since: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl User {
    /// The password is write-only; reading it always fails.
    pub fn password(&self) -> DomainResult<&str> {
        Err(DomainError::AttributeNotReadable("password"))
    }

    /// Replace the stored hash with a fresh salted hash of `password`.
    pub fn set_password(&mut self, password: &str) -> DomainResult<()> {
        let hash = hash_password(password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;
        self.password_hash = Some(hash);
        Ok(())
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn verify_password(&self, candidate: &str) -> bool {
        match self.password_hash.as_deref() {
            Some(hash) => verify_password(candidate, hash).unwrap_or(false),
            None => false,
        }
    }

    pub fn can(&self, permissions: Permission) -> bool {
        self.role
            .as_ref()
            .is_some_and(|role| role.grants(permissions))
    }

    pub fn is_administrator(&self) -> bool {
        self.can(Permission::ADMINISTER)
    }

    /// Record activity. The caller persists the new `last_seen`.
    pub fn ping(&mut self) {
        self.last_seen = Utc::now().max(self.last_seen).max(self.member_since);
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User {:?}>", self.username)
    }
}

/// A user that has not been inserted yet
#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub(crate) password_hash: Option<String>,
    pub role: Option<Role>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub member_since: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl NewUser {
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            email: email.into(),
            username: username.into(),
            password_hash: None,
            role: None,
            name: None,
            location: None,
            member_since: now,
            last_seen: now,
        }
    }

    pub fn set_password(&mut self, password: &str) -> DomainResult<()> {
        let hash = hash_password(password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;
        self.password_hash = Some(hash);
        Ok(())
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }
}

#[cfg(test)]
pub(crate) fn test_user(role: Option<Role>) -> User {
    let now = Utc::now();
    User {
        id: 1,
        email: "john@example.com".into(),
        username: "john".into(),
        password_hash: None,
        role,
        name: None,
        location: None,
        member_since: now,
        last_seen: now,
    }
}
