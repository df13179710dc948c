pub mod blog;
pub mod identity;

pub use blog::PostService;
pub use identity::AccountService;
