use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info};

use crate::db::error::{Result, StoreError};
use crate::entities::{prelude::*, tokens};

/// A minted access/refresh pair to persist for a user.
#[derive(Debug, Clone)]
pub struct NewToken {
    pub user_id: i32,
    pub access_token: String,
    pub refresh_token: String,
    /// `None` lets the entity apply the one week default at insert time.
    pub expires: Option<DateTime<Utc>>,
}

impl NewToken {
    pub fn new(
        user_id: i32,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires: None,
        }
    }

    #[must_use]
    pub fn expires_at(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }
}

pub struct TokenRepository {
    conn: DatabaseConnection,
}

impl TokenRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, token: NewToken) -> Result<tokens::Model> {
        let mut active = tokens::ActiveModel {
            user_id: Set(token.user_id),
            access_token: Set(token.access_token),
            refresh_token: Set(token.refresh_token),
            ..Default::default()
        };
        if let Some(expires) = token.expires {
            active.expires = Set(expires);
        }

        let model = active.insert(&self.conn).await?;
        debug!(
            "Stored token {} for user {} (expires {})",
            model.id, model.user_id, model.expires
        );
        Ok(model)
    }

    pub async fn get_by_access_token(&self, access_token: &str) -> Result<Option<tokens::Model>> {
        let token = Tokens::find()
            .filter(tokens::Column::AccessToken.eq(access_token))
            .one(&self.conn)
            .await?;
        Ok(token)
    }

    pub async fn get_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<tokens::Model>> {
        let token = Tokens::find()
            .filter(tokens::Column::RefreshToken.eq(refresh_token))
            .one(&self.conn)
            .await?;
        Ok(token)
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<tokens::Model>> {
        let rows = Tokens::find()
            .filter(tokens::Column::UserId.eq(user_id))
            .order_by_asc(tokens::Column::Expires)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    /// Swaps the pair held under `refresh_token` for a new one.
    ///
    /// Without an explicit `expires` the new pair gets a fresh one week
    /// lifetime counted from now.
    pub async fn rotate(
        &self,
        refresh_token: &str,
        new_access_token: impl Into<String>,
        new_refresh_token: impl Into<String>,
        expires: Option<DateTime<Utc>>,
    ) -> Result<tokens::Model> {
        let token = self
            .get_by_refresh_token(refresh_token)
            .await?
            .ok_or_else(|| StoreError::not_found("Token", "with given refresh token"))?;

        let mut active: tokens::ActiveModel = token.into();
        active.access_token = Set(new_access_token.into());
        active.refresh_token = Set(new_refresh_token.into());
        active.expires = Set(expires.unwrap_or_else(|| tokens::default_expiry(Utc::now())));

        let model = active.update(&self.conn).await?;
        debug!("Rotated token {} for user {}", model.id, model.user_id);
        Ok(model)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Tokens::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn delete_for_user(&self, user_id: i32) -> Result<u64> {
        let result = Tokens::delete_many()
            .filter(tokens::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Removes every token whose expiry is at or before `now`.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = Tokens::delete_many()
            .filter(tokens::Column::Expires.lte(now))
            .exec(&self.conn)
            .await?;

        if result.rows_affected > 0 {
            info!("Pruned {} expired token(s)", result.rows_affected);
        }
        Ok(result.rows_affected)
    }
}
