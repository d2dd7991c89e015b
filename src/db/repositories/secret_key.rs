use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::db::error::Result;
use crate::entities::{prelude::*, secret_keys};

pub struct SecretKeyRepository {
    conn: DatabaseConnection,
}

impl SecretKeyRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        user_id: i32,
        secret_key: impl Into<String>,
    ) -> Result<secret_keys::Model> {
        let model = secret_keys::ActiveModel {
            user_id: Set(user_id),
            secret_key: Set(secret_key.into()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        debug!("Stored secret key {} for user {}", model.id, model.user_id);
        Ok(model)
    }

    /// Generates and stores a fresh random key for the user.
    pub async fn issue(&self, user_id: i32) -> Result<secret_keys::Model> {
        self.create(user_id, generate_secret_key()).await
    }

    pub async fn get_by_key(&self, secret_key: &str) -> Result<Option<secret_keys::Model>> {
        let key = SecretKeys::find()
            .filter(secret_keys::Column::SecretKey.eq(secret_key))
            .one(&self.conn)
            .await?;
        Ok(key)
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<secret_keys::Model>> {
        let rows = SecretKeys::find()
            .filter(secret_keys::Column::UserId.eq(user_id))
            .order_by_asc(secret_keys::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = SecretKeys::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn delete_for_user(&self, user_id: i32) -> Result<u64> {
        let result = SecretKeys::delete_many()
            .filter(secret_keys::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected)
    }
}

/// Generate a random secret key (64 character hex string)
#[must_use]
pub fn generate_secret_key() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();

    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}
