use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub calories: i32,

    #[sea_orm(default_value = false)]
    pub is_activated: bool,

    pub user_id: i32,

    pub create_at: ChronoDateTimeUtc,

    pub update_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::recipes_products::Entity")]
    RecipesProducts,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::recipes_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipesProducts.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        super::recipes_products::Relation::Product.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::recipes_products::Relation::Recipe.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now();
        if insert && self.create_at.is_not_set() {
            self.create_at = Set(now);
        }
        self.update_at = Set(now);
        Ok(self)
    }
}
