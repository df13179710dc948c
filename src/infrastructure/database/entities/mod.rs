//! Database entities module

pub mod post;
pub mod role;
pub mod user;

pub use post::Entity as Post;
pub use role::Entity as Role;
pub use user::Entity as User;
