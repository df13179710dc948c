//! Role aggregate
//!
//! Named permission bundles and the built-in role seeds.

pub mod model;
pub mod repository;

pub use model::{Role, RoleSeed, BUILTIN_ROLES};
pub use repository::RoleRepository;
