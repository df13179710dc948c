use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info};

use super::{db_err, write_err};
use crate::domain::{DomainResult, Permission, Role, RoleRepository, RoleSeed};
use crate::infrastructure::database::entities::role;

pub struct SeaOrmRoleRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn role_model_to_domain(model: role::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
        is_default: model.is_default,
        permissions: Permission::from_db(model.permissions),
    }
}

#[async_trait]
impl RoleRepository for SeaOrmRoleRepository {
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Role>> {
        let model = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(role_model_to_domain))
    }

    async fn find_default(&self) -> DomainResult<Option<Role>> {
        let model = role::Entity::find()
            .filter(role::Column::IsDefault.eq(true))
            .order_by_asc(role::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(role_model_to_domain))
    }

    async fn find_by_permissions(&self, permissions: Permission) -> DomainResult<Option<Role>> {
        let model = role::Entity::find()
            .filter(role::Column::Permissions.eq(permissions.to_db()))
            .order_by_asc(role::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(role_model_to_domain))
    }

    async fn list_roles(&self) -> DomainResult<Vec<Role>> {
        let models = role::Entity::find()
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(role_model_to_domain).collect())
    }

    async fn upsert_roles(&self, seeds: &[RoleSeed]) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        for seed in seeds {
            let existing = role::Entity::find()
                .filter(role::Column::Name.eq(seed.name))
                .one(&txn)
                .await
                .map_err(db_err)?;

            match existing {
                Some(model) => {
                    debug!(role = seed.name, "Updating role");
                    let mut active: role::ActiveModel = model.into();
                    active.permissions = Set(seed.permissions.to_db());
                    active.is_default = Set(seed.is_default);
                    active.update(&txn).await.map_err(db_err)?;
                }
                None => {
                    debug!(role = seed.name, "Creating role");
                    role::ActiveModel {
                        id: NotSet,
                        name: Set(seed.name.to_string()),
                        is_default: Set(seed.is_default),
                        permissions: Set(seed.permissions.to_db()),
                    }
                    .insert(&txn)
                    .await
                    .map_err(|e| write_err(e, "Role"))?;
                }
            }
        }

        // dropping an uncommitted transaction rolls it back
        txn.commit().await.map_err(db_err)?;
        info!(count = seeds.len(), "Roles seeded");
        Ok(())
    }
}
