use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Repository, RepositoryError};
use crate::models::{AdminRecord, Recipe, UserRecord};

#[derive(Default)]
struct Tables {
    users: Vec<UserRecord>,
    recipes: Vec<Recipe>,
    admins: Vec<AdminRecord>,
}

/// InMemoryRepository
///
/// `Repository` over process memory, used by the test suite. Inserts check
/// email uniqueness and push under the same write lock, which gives the same
/// guarantee as the Postgres unique index.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
    // When set, every call fails as if the store were unreachable.
    unavailable: bool,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every operation fails with a database error.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn list_users(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        self.check_available()?;
        Ok(self.tables.read().await.users.clone())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: UserRecord) -> Result<UserRecord, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict);
        }
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok(tables.users.len() < before)
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, RepositoryError> {
        self.check_available()?;
        Ok(self.tables.read().await.recipes.clone())
    }

    async fn create_recipe(&self, recipe: Recipe) -> Result<Recipe, RepositoryError> {
        self.check_available()?;
        self.tables.write().await.recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn delete_recipe(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let before = tables.recipes.len();
        tables.recipes.retain(|r| r.id != id);
        Ok(tables.recipes.len() < before)
    }

    async fn list_admins(&self) -> Result<Vec<AdminRecord>, RepositoryError> {
        self.check_available()?;
        Ok(self.tables.read().await.admins.clone())
    }

    async fn find_admin_by_id(&self, id: Uuid) -> Result<Option<AdminRecord>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.admins.iter().find(|a| a.id == id).cloned())
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminRecord>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.admins.iter().find(|a| a.email == email).cloned())
    }

    async fn create_admin(&self, admin: AdminRecord) -> Result<AdminRecord, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.admins.iter().any(|a| a.email == admin.email) {
            return Err(RepositoryError::Conflict);
        }
        tables.admins.push(admin.clone());
        Ok(admin)
    }
}
