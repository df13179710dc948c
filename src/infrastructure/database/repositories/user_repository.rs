use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Select, Set,
};

use super::role_repository::role_model_to_domain;
use super::{db_err, write_err};
use crate::domain::{
    DomainError, DomainResult, NewUser, UpdateProfileDto, User, UserRepository,
};
use crate::infrastructure::database::entities::{role, user};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_one(&self, query: Select<user::Entity>) -> DomainResult<Option<User>> {
        let row = query
            .find_also_related(role::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.map(|(model, role)| user_model_to_domain(model, role)))
    }

    fn not_found(id: i32) -> DomainError {
        DomainError::NotFound {
            entity: "User",
            field: "id",
            value: id.to_string(),
        }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model, role: Option<role::Model>) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        password_hash: model.password_hash,
        role: role.map(role_model_to_domain),
        name: model.name,
        location: model.location,
        member_since: model.member_since,
        last_seen: model.last_seen,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn insert_user(&self, new_user: NewUser) -> DomainResult<User> {
        let active = user::ActiveModel {
            id: NotSet,
            email: Set(new_user.email),
            username: Set(new_user.username),
            password_hash: Set(new_user.password_hash),
            role_id: Set(new_user.role.as_ref().map(|r| r.id)),
            name: Set(new_user.name),
            location: Set(new_user.location),
            member_since: Set(new_user.member_since),
            last_seen: Set(new_user.last_seen),
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, "Username or email"))?;

        Ok(User {
            id: model.id,
            email: model.email,
            username: model.username,
            password_hash: model.password_hash,
            role: new_user.role,
            name: model.name,
            location: model.location,
            member_since: model.member_since,
            last_seen: model.last_seen,
        })
    }

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        self.find_one(user::Entity::find_by_id(id)).await
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        self.find_one(user::Entity::find().filter(user::Column::Email.eq(email)))
            .await
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        self.find_one(user::Entity::find().filter(user::Column::Username.eq(username)))
            .await
    }

    async fn list_users_by_role(&self, role_id: i32) -> DomainResult<Vec<User>> {
        let rows = user::Entity::find()
            .filter(user::Column::RoleId.eq(role_id))
            .order_by_asc(user::Column::Id)
            .find_also_related(role::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(model, role)| user_model_to_domain(model, role))
            .collect())
    }

    async fn update_last_seen(&self, id: i32, last_seen: DateTime<Utc>) -> DomainResult<()> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::LastSeen, Expr::value(last_seen))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn update_password_hash(&self, id: i32, password_hash: &str) -> DomainResult<()> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(Self::not_found(id));
        };

        let mut active: user::ActiveModel = existing.into();
        active.password_hash = Set(Some(password_hash.to_string()));
        active.update(&self.db).await.map_err(db_err)?;

        Ok(())
    }

    async fn update_profile(&self, id: i32, dto: UpdateProfileDto) -> DomainResult<Option<User>> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();
        if let Some(name) = dto.name {
            active.name = Set(Some(name));
        }
        if let Some(location) = dto.location {
            active.location = Set(Some(location));
        }

        if active.is_changed() {
            active.update(&self.db).await.map_err(db_err)?;
        }

        self.get_user_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Permission, RoleRepository, BUILTIN_ROLES};
    use crate::infrastructure::database::repositories::SeaOrmRoleRepository;
    use crate::infrastructure::database::test_support::memory_db;

    fn new_user(email: &str, username: &str) -> NewUser {
        NewUser::new(email, username)
    }

    #[tokio::test]
    async fn test_insert_and_load_with_role() {
        let db = memory_db().await;
        let roles = SeaOrmRoleRepository::new(db.clone());
        roles.upsert_roles(&BUILTIN_ROLES).await.unwrap();
        let users = SeaOrmUserRepository::new(db);

        let mut candidate = new_user("mod@example.com", "mod");
        candidate.role = roles.find_by_name("Moderator").await.unwrap();
        candidate.set_password("secret").unwrap();
        let created = users.insert_user(candidate).await.unwrap();
        assert!(created.id > 0);

        let loaded = users.get_user_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(loaded.username, "mod");
        assert!(loaded.can(Permission::MODERATE_COMMENTS));
        assert!(!loaded.is_administrator());
        assert!(loaded.verify_password("secret"));

        let by_email = users.get_user_by_email("mod@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(created.id));
        let by_name = users.get_user_by_username("mod").await.unwrap();
        assert_eq!(by_name.map(|u| u.id), Some(created.id));
        assert!(users.get_user_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let users = SeaOrmUserRepository::new(memory_db().await);
        users
            .insert_user(new_user("a@example.com", "a"))
            .await
            .unwrap();

        let err = users
            .insert_user(new_user("a@example.com", "b"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let err = users
            .insert_user(new_user("b@example.com", "a"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_user_without_role_round_trips() {
        let users = SeaOrmUserRepository::new(memory_db().await);
        let created = users
            .insert_user(new_user("a@example.com", "a"))
            .await
            .unwrap();

        let loaded = users.get_user_by_id(created.id).await.unwrap().unwrap();
        assert!(loaded.role.is_none());
        assert!(!loaded.can(Permission::empty()));
        assert!(loaded.password_hash().is_none());
    }

    #[tokio::test]
    async fn test_list_users_by_role() {
        let db = memory_db().await;
        let roles = SeaOrmRoleRepository::new(db.clone());
        roles.upsert_roles(&BUILTIN_ROLES).await.unwrap();
        let default_role = roles.find_default().await.unwrap().unwrap();
        let users = SeaOrmUserRepository::new(db);

        for (email, username) in [("a@example.com", "a"), ("b@example.com", "b")] {
            let mut candidate = new_user(email, username);
            candidate.role = Some(default_role.clone());
            users.insert_user(candidate).await.unwrap();
        }
        users
            .insert_user(new_user("c@example.com", "c"))
            .await
            .unwrap();

        let members = users.list_users_by_role(default_role.id).await.unwrap();
        let names: Vec<_> = members.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[tokio::test]
    async fn test_updates() {
        let users = SeaOrmUserRepository::new(memory_db().await);
        let mut user = users
            .insert_user(new_user("a@example.com", "a"))
            .await
            .unwrap();

        user.ping();
        users.update_last_seen(user.id, user.last_seen).await.unwrap();
        let loaded = users.get_user_by_id(user.id).await.unwrap().unwrap();
        assert!((loaded.last_seen - user.last_seen).num_milliseconds().abs() < 1000);
        assert!(loaded.last_seen >= loaded.member_since);

        user.set_password("fresh").unwrap();
        users
            .update_password_hash(user.id, user.password_hash().unwrap())
            .await
            .unwrap();
        let loaded = users.get_user_by_id(user.id).await.unwrap().unwrap();
        assert!(loaded.verify_password("fresh"));

        let updated = users
            .update_profile(
                user.id,
                UpdateProfileDto {
                    name: Some("Alice".into()),
                    location: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("Alice"));
        assert!(updated.location.is_none());

        assert!(matches!(
            users.update_last_seen(42, user.last_seen).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(users
            .update_profile(42, UpdateProfileDto::default())
            .await
            .unwrap()
            .is_none());
    }
}
