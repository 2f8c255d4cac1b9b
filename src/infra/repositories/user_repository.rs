//! User repository - the persistence gateway for the `users` table.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use super::entities::user::{ActiveModel, Entity as UserEntity};
use crate::domain::{User, UserPayload};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Absent rows are reported as `None`, never as an error. Every mutating
/// call writes through to the store before it returns.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every user in store-default order
    async fn list_all(&self) -> AppResult<Vec<User>>;

    /// Find user by primary key
    async fn get_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Insert a new user and return it with its assigned id.
    ///
    /// A `None` payload is a no-op and yields `None`.
    async fn create(&self, user: Option<UserPayload>) -> AppResult<Option<User>>;

    /// Overwrite name and country of an existing user.
    ///
    /// Returns `None` without writing anything when `id` does not exist.
    async fn update(&self, patch: UserPayload, id: i32) -> AppResult<Option<User>>;

    /// Remove a user. Deleting an unknown id is a no-op.
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn list_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find().all(&self.db).await?;
        tracing::debug!(count = models.len(), "Listed users");

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        tracing::debug!(id, found = result.is_some(), "Looked up user");

        Ok(result.map(User::from))
    }

    async fn create(&self, user: Option<UserPayload>) -> AppResult<Option<User>> {
        let Some(user) = user else {
            tracing::debug!("Skipping create for empty payload");
            return Ok(None);
        };

        let active_model = ActiveModel {
            user_name: Set(user.user_name),
            country: Set(user.country),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        tracing::info!(id = model.id, "Created user");

        Ok(Some(User::from(model)))
    }

    async fn update(&self, patch: UserPayload, id: i32) -> AppResult<Option<User>> {
        let Some(user) = UserEntity::find_by_id(id).one(&self.db).await? else {
            tracing::debug!(id, "Update skipped, user not found");
            return Ok(None);
        };

        let mut active: ActiveModel = user.into();
        active.user_name = Set(patch.user_name);
        active.country = Set(patch.country);

        let model = active.update(&self.db).await?;
        tracing::info!(id, "Updated user");

        Ok(Some(User::from(model)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            tracing::debug!(id, "Delete skipped, user not found");
        } else {
            tracing::info!(id, "Deleted user");
        }

        Ok(())
    }
}
