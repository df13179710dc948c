use async_trait::async_trait;

use super::{NewPost, Post};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert_post(&self, post: NewPost) -> DomainResult<Post>;
    async fn get_post_by_id(&self, id: i32) -> DomainResult<Option<Post>>;

    /// All posts, newest first.
    async fn list_posts(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Post>>;
    /// Posts written by one user, newest first.
    async fn list_posts_by_author(
        &self,
        author_id: i32,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Post>>;
}
