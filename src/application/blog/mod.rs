//! Blog module — publishing and reading posts

pub mod service;

pub use service::PostService;
