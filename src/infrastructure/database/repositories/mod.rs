//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod post_repository;
pub mod repository_provider;
pub mod role_repository;
pub mod user_repository;

pub use post_repository::SeaOrmPostRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use role_repository::SeaOrmRoleRepository;
pub use user_repository::SeaOrmUserRepository;

use crate::domain::DomainError;

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Like [`db_err`], but reports unique index violations as conflicts.
fn write_err(e: sea_orm::DbErr, what: &str) -> DomainError {
    let msg = e.to_string();
    if msg.contains("UNIQUE") || msg.contains("duplicate") {
        DomainError::Conflict(format!("{} already exists", what))
    } else {
        db_err(e)
    }
}
