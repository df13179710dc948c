pub mod model;
pub mod repository;

pub use model::{NewPost, Post};
pub use repository::PostRepository;
