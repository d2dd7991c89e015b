use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::db::error::{Result, StoreError};
use crate::entities::{prelude::*, users};

/// Fields required to register a user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hashed_password: String,
    pub is_activated: bool,
    pub is_admin: bool,
}

impl NewUser {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        hashed_password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            hashed_password: hashed_password.into(),
            is_activated: true,
            is_admin: false,
        }
    }
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub hashed_password: Option<String>,
    pub is_activated: Option<bool>,
    pub is_admin: Option<bool>,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, user: NewUser) -> Result<users::Model> {
        let model = users::ActiveModel {
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email: Set(user.email),
            hashed_password: Set(user.hashed_password),
            is_activated: Set(user.is_activated),
            is_admin: Set(user.is_admin),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        debug!("Created user {} <{}>", model.id, model.email);
        Ok(model)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<users::Model>> {
        Ok(Users::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        let user = Users::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await?;
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<users::Model>> {
        let rows = Users::find()
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn update(&self, id: i32, changes: UserChanges) -> Result<users::Model> {
        let user = Users::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| StoreError::not_found("User", id))?;

        let mut active: users::ActiveModel = user.into();
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(hashed_password) = changes.hashed_password {
            active.hashed_password = Set(hashed_password);
        }
        if let Some(is_activated) = changes.is_activated {
            active.is_activated = Set(is_activated);
        }
        if let Some(is_admin) = changes.is_admin {
            active.is_admin = Set(is_admin);
        }

        let model = active.update(&self.conn).await?;
        debug!("Updated user {}", model.id);
        Ok(model)
    }

    pub async fn set_activated(&self, id: i32, activated: bool) -> Result<users::Model> {
        self.update(
            id,
            UserChanges {
                is_activated: Some(activated),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn set_admin(&self, id: i32, admin: bool) -> Result<users::Model> {
        self.update(
            id,
            UserChanges {
                is_admin: Some(admin),
                ..Default::default()
            },
        )
        .await
    }

    /// Deletes the user. Recipes, tokens and secret keys go with it through
    /// the `ON DELETE CASCADE` foreign keys.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Users::delete_by_id(id).exec(&self.conn).await?;
        if result.rows_affected > 0 {
            debug!("Deleted user {}", id);
        }
        Ok(result.rows_affected > 0)
    }
}
