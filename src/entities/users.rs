use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub first_name: String,

    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub last_name: String,

    #[sea_orm(column_type = "String(StringLen::N(50))", unique, indexed)]
    pub email: String,

    #[sea_orm(default_value = true)]
    pub is_activated: bool,

    #[sea_orm(default_value = false)]
    pub is_admin: bool,

    /// Already-hashed password. Plaintext never reaches this column.
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub hashed_password: String,

    pub create_at: ChronoDateTimeUtc,

    pub update_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::recipes::Entity")]
    Recipes,
    #[sea_orm(has_many = "super::tokens::Entity")]
    Tokens,
    #[sea_orm(has_many = "super::secret_keys::Entity")]
    SecretKeys,
}

impl Related<super::recipes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipes.def()
    }
}

impl Related<super::tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tokens.def()
    }
}

impl Related<super::secret_keys::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SecretKeys.def()
    }
}

impl Model {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
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
