use chrono::Utc;
use contracts::domain::a002_platform::aggregate::{Platform, PlatformId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_platform")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub name: String,
    pub slug: String,
    pub commission_rate: f64,
    pub default_currency: String,
    pub color: Option<String>,
    pub is_active: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Platform {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Platform {
            base: BaseAggregate::with_metadata(PlatformId(uuid), m.code, metadata),
            name: m.name,
            slug: m.slug,
            commission_rate: m.commission_rate,
            default_currency: m.default_currency,
            color: m.color,
            is_active: m.is_active,
        }
    }
}

fn to_active_model(aggregate: &Platform) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        name: Set(aggregate.name.clone()),
        slug: Set(aggregate.slug.clone()),
        commission_rate: Set(aggregate.commission_rate),
        default_currency: Set(aggregate.default_currency.clone()),
        color: Set(aggregate.color.clone()),
        is_active: Set(aggregate.is_active),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<Platform>> {
    let mut items: Vec<Platform> = Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(items)
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<Option<Platform>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_slug<C: ConnectionTrait>(db: &C, slug: &str) -> anyhow::Result<Option<Platform>> {
    let result = Entity::find()
        .filter(Column::Slug.eq(slug))
        .one(db)
        .await?;
    Ok(result.map(Into::into))
}

pub async fn count_active<C: ConnectionTrait>(db: &C) -> anyhow::Result<i64> {
    let count = Entity::find()
        .filter(Column::IsActive.eq(true))
        .count(db)
        .await?;
    Ok(count as i64)
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Platform) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active_model(aggregate).insert(db).await?;
    Ok(uuid)
}

pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &Platform) -> anyhow::Result<()> {
    let mut active = to_active_model(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(db).await?;
    Ok(())
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
