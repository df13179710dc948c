use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use super::{db_err, write_err};
use crate::domain::{DomainResult, NewPost, Post, PostRepository};
use crate::infrastructure::database::entities::post;
use crate::shared::{PaginatedResult, PaginationParams};

pub struct SeaOrmPostRepository {
    db: DatabaseConnection,
}

impl SeaOrmPostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn paginate(
        &self,
        query: Select<post::Entity>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Post>> {
        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let models = query
            .order_by_desc(post::Column::Timestamp)
            .order_by_desc(post::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit()))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = models.into_iter().map(post_model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page.page(), page.limit()))
    }
}

fn post_model_to_domain(model: post::Model) -> Post {
    Post {
        id: model.id,
        body: model.body,
        timestamp: model.timestamp,
        author_id: model.author_id,
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn insert_post(&self, new_post: NewPost) -> DomainResult<Post> {
        let model = post::ActiveModel {
            id: NotSet,
            body: Set(new_post.body),
            timestamp: Set(Utc::now()),
            author_id: Set(new_post.author_id),
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_err(e, "Post"))?;

        Ok(post_model_to_domain(model))
    }

    async fn get_post_by_id(&self, id: i32) -> DomainResult<Option<Post>> {
        let model = post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(post_model_to_domain))
    }

    async fn list_posts(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Post>> {
        self.paginate(post::Entity::find(), page).await
    }

    async fn list_posts_by_author(
        &self,
        author_id: i32,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Post>> {
        self.paginate(
            post::Entity::find().filter(post::Column::AuthorId.eq(author_id)),
            page,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewUser, UserRepository};
    use crate::infrastructure::database::repositories::SeaOrmUserRepository;
    use crate::infrastructure::database::test_support::memory_db;

    #[tokio::test]
    async fn test_insert_and_list_newest_first() {
        let db = memory_db().await;
        let users = SeaOrmUserRepository::new(db.clone());
        let alice = users
            .insert_user(NewUser::new("alice@example.com", "alice"))
            .await
            .unwrap();
        let bob = users
            .insert_user(NewUser::new("bob@example.com", "bob"))
            .await
            .unwrap();
        let posts = SeaOrmPostRepository::new(db);

        for (author, body) in [(alice.id, "first"), (bob.id, "second"), (alice.id, "third")] {
            posts
                .insert_post(NewPost {
                    body: body.into(),
                    author_id: author,
                })
                .await
                .unwrap();
        }

        let page = posts.list_posts(PaginationParams::new(1, 2)).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        let bodies: Vec<_> = page.items.iter().map(|p| p.body.as_str()).collect();
        assert_eq!(bodies, ["third", "second"]);

        let by_alice = posts
            .list_posts_by_author(alice.id, PaginationParams::default())
            .await
            .unwrap();
        let bodies: Vec<_> = by_alice.items.iter().map(|p| p.body.as_str()).collect();
        assert_eq!(bodies, ["third", "first"]);
        assert!(by_alice.items.iter().all(|p| p.author_id == alice.id));
    }

    #[tokio::test]
    async fn test_get_post_by_id() {
        let db = memory_db().await;
        let author = SeaOrmUserRepository::new(db.clone())
            .insert_user(NewUser::new("a@example.com", "a"))
            .await
            .unwrap();
        let posts = SeaOrmPostRepository::new(db);

        let before = Utc::now();
        let created = posts
            .insert_post(NewPost {
                body: "hello".into(),
                author_id: author.id,
            })
            .await
            .unwrap();
        assert!(created.timestamp >= before);

        let loaded = posts.get_post_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(loaded.body, "hello");
        assert_eq!(loaded.author_id, author.id);
        assert!(posts.get_post_by_id(created.id + 1).await.unwrap().is_none());
    }
}
