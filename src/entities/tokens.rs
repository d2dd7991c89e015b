use chrono::{DateTime, TimeDelta, Utc};
use sea_orm::Set;
use sea_orm::entity::prelude::*;

/// Expiry applied when a token is inserted without one.
#[must_use]
pub fn default_expiry(issued_at: DateTime<Utc>) -> DateTime<Utc> {
    issued_at + TimeDelta::weeks(1)
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(StringLen::N(300))", unique)]
    pub access_token: String,

    #[sea_orm(column_type = "String(StringLen::N(300))", unique)]
    pub refresh_token: String,

    pub expires: ChronoDateTimeUtc,

    pub user_id: i32,
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
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Model {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    // Stamped per insert, not once per process.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.expires.is_not_set() {
            self.expires = Set(default_expiry(Utc::now()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires: DateTime<Utc>) -> Model {
        Model {
            id: 1,
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires,
            user_id: 1,
        }
    }

    #[test]
    fn test_default_expiry_is_one_week() {
        let now = Utc::now();
        assert_eq!(default_expiry(now) - now, TimeDelta::days(7));
    }

    #[test]
    fn test_is_expired() {
        let now = Utc::now();
        assert!(!token(now + TimeDelta::minutes(1)).is_expired(now));
        assert!(token(now).is_expired(now));
        assert!(token(now - TimeDelta::seconds(1)).is_expired(now));
    }
}
