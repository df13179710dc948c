use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, NewPost, Permission, Post, Principal, RepositoryProvider,
};
use crate::shared::{PaginatedResult, PaginationParams};

/// Post service — publishing and timelines.
pub struct PostService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PostService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Publish `body` as `author`. Requires [`Permission::WRITE_ARTICLES`].
    pub async fn publish(&self, author: &dyn Principal, body: &str) -> DomainResult<Post> {
        let Some(author_id) = author.id() else {
            return Err(DomainError::Unauthorized("Sign in to publish".into()));
        };
        if !author.can(Permission::WRITE_ARTICLES) {
            return Err(DomainError::Forbidden(
                "Publishing requires the WRITE_ARTICLES permission".into(),
            ));
        }
        if body.trim().is_empty() {
            return Err(DomainError::Validation("Post body must not be empty".into()));
        }

        let post = self
            .repos
            .posts()
            .insert_post(NewPost {
                body: body.to_string(),
                author_id,
            })
            .await?;

        info!(post_id = post.id, author_id, "Post published");
        Ok(post)
    }

    pub async fn get_post(&self, id: i32) -> DomainResult<Post> {
        self.repos
            .posts()
            .get_post_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Post",
                field: "id",
                value: id.to_string(),
            })
    }

    /// Every post, newest first.
    pub async fn timeline(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Post>> {
        self.repos.posts().list_posts(page).await
    }

    /// Posts by one author, newest first.
    pub async fn posts_by(
        &self,
        author_id: i32,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Post>> {
        self.repos
            .posts()
            .list_posts_by_author(author_id, page)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::identity::AccountService;
    use crate::domain::{AnonymousUser, CreateUserDto, User};
    use crate::infrastructure::database::test_support::memory_db;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    async fn setup(seed: bool) -> (PostService, User) {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(memory_db().await));
        let accounts = AccountService::new(repos.clone(), None);
        if seed {
            accounts.insert_roles().await.unwrap();
        }
        let author = accounts
            .register(CreateUserDto::new("writer@example.com", "writer", "pw"))
            .await
            .unwrap();
        (PostService::new(repos), author)
    }

    #[tokio::test]
    async fn test_publish_and_read_back() {
        let (posts, author) = setup(true).await;

        let first = posts.publish(&author, "Hello, world").await.unwrap();
        let second = posts.publish(&author, "Second post").await.unwrap();
        assert_eq!(first.author_id, author.id);
        assert!(second.timestamp >= first.timestamp);

        assert_eq!(posts.get_post(first.id).await.unwrap().body, "Hello, world");

        let timeline = posts.timeline(PaginationParams::default()).await.unwrap();
        assert_eq!(timeline.total, 2);
        assert_eq!(timeline.items[0].id, second.id);

        let mine = posts
            .posts_by(author.id, PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(mine.items.len(), 2);
    }

    #[tokio::test]
    async fn test_publish_is_guarded() {
        let (posts, author) = setup(true).await;

        assert!(matches!(
            posts.publish(&AnonymousUser, "hi").await,
            Err(DomainError::Unauthorized(_))
        ));
        assert!(matches!(
            posts.publish(&author, "   ").await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            posts.get_post(42).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_roleless_user_cannot_publish() {
        let (posts, author) = setup(false).await;
        assert!(author.role.is_none());
        assert!(matches!(
            posts.publish(&author, "hi").await,
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_timeline_from_page_zero() {
        let (posts, author) = setup(true).await;
        let only = posts.publish(&author, "only post").await.unwrap();

        let page = posts.timeline(PaginationParams::new(0, 0)).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 1);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, only.id);
    }
}
