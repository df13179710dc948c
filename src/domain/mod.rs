pub mod permission;
pub mod post;
pub mod principal;
pub mod repositories;
pub mod role;
pub mod user;

// Re-export commonly used types
pub use permission::Permission;
pub use post::{NewPost, Post, PostRepository};
pub use principal::{AnonymousUser, CurrentUser, Principal};
pub use repositories::{DomainResult, RepositoryProvider};
pub use role::{Role, RoleRepository, RoleSeed, BUILTIN_ROLES};
pub use user::{CreateUserDto, NewUser, UpdateProfileDto, User, UserRepository};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
