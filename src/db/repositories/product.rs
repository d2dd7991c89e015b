use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::db::error::{Result, StoreError};
use crate::entities::{prelude::*, products};

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub calories: i32,
    pub is_activated: bool,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, calories: i32) -> Self {
        Self {
            name: name.into(),
            calories,
            is_activated: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub calories: Option<i32>,
    pub is_activated: Option<bool>,
}

pub struct ProductRepository {
    conn: DatabaseConnection,
}

impl ProductRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, product: NewProduct) -> Result<products::Model> {
        let model = products::ActiveModel {
            name: Set(product.name),
            calories: Set(product.calories),
            is_activated: Set(product.is_activated),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        debug!("Created product {} ({})", model.id, model.name);
        Ok(model)
    }

    pub async fn get(&self, id: i32) -> Result<Option<products::Model>> {
        Ok(Products::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn list(&self) -> Result<Vec<products::Model>> {
        let rows = Products::find()
            .order_by_asc(products::Column::Name)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn list_activated(&self) -> Result<Vec<products::Model>> {
        let rows = Products::find()
            .filter(products::Column::IsActivated.eq(true))
            .order_by_asc(products::Column::Name)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn update(&self, id: i32, changes: ProductChanges) -> Result<products::Model> {
        let product = Products::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        let mut active: products::ActiveModel = product.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(calories) = changes.calories {
            active.calories = Set(calories);
        }
        if let Some(is_activated) = changes.is_activated {
            active.is_activated = Set(is_activated);
        }

        Ok(active.update(&self.conn).await?)
    }

    pub async fn set_activated(&self, id: i32, activated: bool) -> Result<products::Model> {
        self.update(
            id,
            ProductChanges {
                is_activated: Some(activated),
                ..Default::default()
            },
        )
        .await
    }

    /// Association rows referencing the product are removed by cascade.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Products::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
