use chrono::Utc;
use contracts::domain::a003_platform_listing::aggregate::{ListingId, PlatformListing};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::listing_status::ListingStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_platform_listing")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub product_id: String,
    pub platform_id: String,
    pub price: f64,
    pub currency: String,
    pub product_url: Option<String>,
    pub status: String,
    pub listed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PlatformListing {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let status = ListingStatus::from_code(&m.status).unwrap_or_default();

        PlatformListing {
            base: BaseAggregate::with_metadata(ListingId(uuid), m.code, metadata),
            product_id: m.product_id,
            platform_id: m.platform_id,
            price: m.price,
            currency: m.currency,
            product_url: m.product_url,
            status,
            listed_at: m.listed_at,
        }
    }
}

fn to_active_model(aggregate: &PlatformListing) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        product_id: Set(aggregate.product_id.clone()),
        platform_id: Set(aggregate.platform_id.clone()),
        price: Set(aggregate.price),
        currency: Set(aggregate.currency.clone()),
        product_url: Set(aggregate.product_url.clone()),
        status: Set(aggregate.status.code().to_string()),
        listed_at: Set(aggregate.listed_at),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_by_product<C: ConnectionTrait>(
    db: &C,
    product_id: &str,
) -> anyhow::Result<Vec<PlatformListing>> {
    let items = Entity::find()
        .filter(Column::ProductId.eq(product_id))
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> anyhow::Result<Option<PlatformListing>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn count_by_platform<C: ConnectionTrait>(
    db: &C,
    platform_id: &str,
) -> anyhow::Result<u64> {
    let count = Entity::find()
        .filter(Column::PlatformId.eq(platform_id))
        .count(db)
        .await?;
    Ok(count)
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    aggregate: &PlatformListing,
) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active_model(aggregate).insert(db).await?;
    Ok(uuid)
}

pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &PlatformListing) -> anyhow::Result<()> {
    let mut active = to_active_model(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(db).await?;
    Ok(())
}

pub async fn delete_by_ids<C: ConnectionTrait>(db: &C, ids: &[String]) -> anyhow::Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let result = Entity::delete_many()
        .filter(Column::Id.is_in(ids.to_vec()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_by_product<C: ConnectionTrait>(
    db: &C,
    product_id: &str,
) -> anyhow::Result<u64> {
    let result = Entity::delete_many()
        .filter(Column::ProductId.eq(product_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
