use std::collections::BTreeSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::db::error::{Result, StoreError};
use crate::entities::{prelude::*, products, recipes, recipes_products};

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub calories: i32,
    pub is_activated: bool,
}

impl NewRecipe {
    pub fn new(
        user_id: i32,
        title: impl Into<String>,
        description: impl Into<String>,
        calories: i32,
    ) -> Self {
        Self {
            user_id,
            title: title.into(),
            description: description.into(),
            calories,
            is_activated: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecipeChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub calories: Option<i32>,
    pub is_activated: Option<bool>,
}

/// A recipe together with the products it is associated with.
#[derive(Debug, Clone)]
pub struct RecipeWithProducts {
    pub recipe: recipes::Model,
    pub products: Vec<products::Model>,
}

impl RecipeWithProducts {
    #[must_use]
    pub fn product_calories(&self) -> i64 {
        self.products.iter().map(|p| i64::from(p.calories)).sum()
    }
}

pub struct RecipeRepository {
    conn: DatabaseConnection,
}

impl RecipeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn require(&self, id: i32) -> Result<recipes::Model> {
        Recipes::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| StoreError::not_found("Recipe", id))
    }

    // ========================================================================
    // Recipe CRUD
    // ========================================================================

    /// Fails with [`StoreError::ForeignKeyViolation`] when the owner is missing.
    pub async fn create(&self, recipe: NewRecipe) -> Result<recipes::Model> {
        let model = recipes::ActiveModel {
            user_id: Set(recipe.user_id),
            title: Set(recipe.title),
            description: Set(recipe.description),
            calories: Set(recipe.calories),
            is_activated: Set(recipe.is_activated),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        debug!("Created recipe {} for user {}", model.id, model.user_id);
        Ok(model)
    }

    pub async fn get(&self, id: i32) -> Result<Option<recipes::Model>> {
        Ok(Recipes::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn list(&self) -> Result<Vec<recipes::Model>> {
        let rows = Recipes::find()
            .order_by_asc(recipes::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<recipes::Model>> {
        let rows = Recipes::find()
            .filter(recipes::Column::UserId.eq(user_id))
            .order_by_asc(recipes::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn update(&self, id: i32, changes: RecipeChanges) -> Result<recipes::Model> {
        let recipe = self.require(id).await?;

        let mut active: recipes::ActiveModel = recipe.into();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(calories) = changes.calories {
            active.calories = Set(calories);
        }
        if let Some(is_activated) = changes.is_activated {
            active.is_activated = Set(is_activated);
        }

        Ok(active.update(&self.conn).await?)
    }

    pub async fn set_activated(&self, id: i32, activated: bool) -> Result<recipes::Model> {
        self.update(
            id,
            RecipeChanges {
                is_activated: Some(activated),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Recipes::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Recipe <-> Product association
    // ========================================================================

    /// Links a product to a recipe. A pair that is already linked fails with
    /// [`StoreError::UniqueViolation`].
    pub async fn add_product(&self, recipe_id: i32, product_id: i32) -> Result<()> {
        RecipesProducts::insert(recipes_products::ActiveModel {
            recipe_id: Set(recipe_id),
            product_id: Set(product_id),
        })
        .exec_without_returning(&self.conn)
        .await?;

        debug!("Linked product {} to recipe {}", product_id, recipe_id);
        Ok(())
    }

    pub async fn remove_product(&self, recipe_id: i32, product_id: i32) -> Result<bool> {
        let result = RecipesProducts::delete_many()
            .filter(recipes_products::Column::RecipeId.eq(recipe_id))
            .filter(recipes_products::Column::ProductId.eq(product_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Replaces the full product set of a recipe in one transaction.
    /// Repeated ids in `product_ids` are linked once.
    pub async fn set_products(&self, recipe_id: i32, product_ids: &[i32]) -> Result<()> {
        let unique: BTreeSet<i32> = product_ids.iter().copied().collect();

        let txn = self.conn.begin().await?;

        Recipes::find_by_id(recipe_id)
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::not_found("Recipe", recipe_id))?;

        RecipesProducts::delete_many()
            .filter(recipes_products::Column::RecipeId.eq(recipe_id))
            .exec(&txn)
            .await?;

        if !unique.is_empty() {
            let links: Vec<recipes_products::ActiveModel> = unique
                .iter()
                .map(|&product_id| recipes_products::ActiveModel {
                    recipe_id: Set(recipe_id),
                    product_id: Set(product_id),
                })
                .collect();

            RecipesProducts::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        debug!(
            "Recipe {} now has {} product(s)",
            recipe_id,
            unique.len()
        );
        Ok(())
    }

    pub async fn products_of(&self, recipe_id: i32) -> Result<Vec<products::Model>> {
        let recipe = self.require(recipe_id).await?;
        let rows = recipe
            .find_related(Products)
            .order_by_asc(products::Column::Name)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn recipes_with(&self, product_id: i32) -> Result<Vec<recipes::Model>> {
        let product = Products::find_by_id(product_id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| StoreError::not_found("Product", product_id))?;

        let rows = product
            .find_related(Recipes)
            .order_by_asc(recipes::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get_with_products(&self, recipe_id: i32) -> Result<Option<RecipeWithProducts>> {
        let Some(recipe) = self.get(recipe_id).await? else {
            return Ok(None);
        };

        let products = recipe
            .find_related(Products)
            .order_by_asc(products::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(Some(RecipeWithProducts { recipe, products }))
    }

    /// Sum of the linked products' calories. Independent of the recipe's
    /// stored `calories` column.
    pub async fn total_product_calories(&self, recipe_id: i32) -> Result<i64> {
        let products = self.products_of(recipe_id).await?;
        Ok(products.iter().map(|p| i64::from(p.calories)).sum())
    }
}
