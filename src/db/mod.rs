use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::prelude::*;

pub mod error;
pub mod migrator;
pub mod repositories;

pub use error::{Result, StoreError};
pub use repositories::product::{NewProduct, ProductChanges, ProductRepository};
pub use repositories::recipe::{NewRecipe, RecipeChanges, RecipeRepository, RecipeWithProducts};
pub use repositories::secret_key::{SecretKeyRepository, generate_secret_key};
pub use repositories::token::{NewToken, TokenRepository};
pub use repositories::user::{NewUser, UserChanges, UserRepository};

/// Row counts per table, as reported by `recipebook status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub users: u64,
    pub products: u64,
    pub recipes: u64,
    pub tokens: u64,
    pub secret_keys: u64,
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            let path = Path::new(path_str);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
            if !tokio::fs::try_exists(path).await? {
                tokio::fs::File::create(path).await?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & schema ready (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    pub async fn counts(&self) -> Result<TableCounts> {
        Ok(TableCounts {
            users: Users::find().count(&self.conn).await?,
            products: Products::find().count(&self.conn).await?,
            recipes: Recipes::find().count(&self.conn).await?,
            tokens: Tokens::find().count(&self.conn).await?,
            secret_keys: SecretKeys::find().count(&self.conn).await?,
        })
    }

    // ========== Repositories ==========

    #[must_use]
    pub fn user_repo(&self) -> UserRepository {
        UserRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn product_repo(&self) -> ProductRepository {
        ProductRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn recipe_repo(&self) -> RecipeRepository {
        RecipeRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn token_repo(&self) -> TokenRepository {
        TokenRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn secret_key_repo(&self) -> SecretKeyRepository {
        SecretKeyRepository::new(self.conn.clone())
    }
}
