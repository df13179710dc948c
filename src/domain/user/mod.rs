//! User aggregate
//!
//! Contains the User entity, DTOs, the role-resolving factory and the
//! repository interface.

pub mod factory;
pub mod model;
pub mod repository;

mod dto_create;
mod dto_update;

// Re-export model types
pub use model::{NewUser, User};

// Re-export DTOs
pub use dto_create::CreateUserDto;
pub use dto_update::UpdateProfileDto;

pub use factory::build_new_user;
pub use repository::UserRepository;
