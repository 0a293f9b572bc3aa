use chrono::{NaiveDate, Utc};
use contracts::domain::a004_sales_record::aggregate::{SalesRecord, SalesRecordId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_sales_record")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub listing_id: String,
    pub period_start: String, // stored as YYYY-MM-DD
    pub period_end: String,   // stored as YYYY-MM-DD
    pub quantity: i32,
    pub gross_revenue: f64,
    pub commission_amount: f64,
    pub net_revenue: f64,
    pub currency: String,
    pub notes: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SalesRecord {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let period_start = NaiveDate::parse_from_str(&m.period_start, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive());
        let period_end = NaiveDate::parse_from_str(&m.period_end, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive());

        SalesRecord {
            base: BaseAggregate::with_metadata(SalesRecordId(uuid), m.code, metadata),
            listing_id: m.listing_id,
            period_start,
            period_end,
            quantity: m.quantity,
            gross_revenue: m.gross_revenue,
            commission_amount: m.commission_amount,
            net_revenue: m.net_revenue,
            currency: m.currency,
            notes: m.notes,
        }
    }
}

fn to_active_model(aggregate: &SalesRecord) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        listing_id: Set(aggregate.listing_id.clone()),
        period_start: Set(aggregate.period_start.format("%Y-%m-%d").to_string()),
        period_end: Set(aggregate.period_end.format("%Y-%m-%d").to_string()),
        quantity: Set(aggregate.quantity),
        gross_revenue: Set(aggregate.gross_revenue),
        commission_amount: Set(aggregate.commission_amount),
        net_revenue: Set(aggregate.net_revenue),
        currency: Set(aggregate.currency.clone()),
        notes: Set(aggregate.notes.clone()),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_by_listing<C: ConnectionTrait>(
    db: &C,
    listing_id: &str,
) -> anyhow::Result<Vec<SalesRecord>> {
    let items = Entity::find()
        .filter(Column::ListingId.eq(listing_id))
        .order_by_desc(Column::PeriodEnd)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_listing_ids<C: ConnectionTrait>(
    db: &C,
    listing_ids: &[String],
) -> anyhow::Result<Vec<SalesRecord>> {
    if listing_ids.is_empty() {
        return Ok(Vec::new());
    }
    let items = Entity::find()
        .filter(Column::ListingId.is_in(listing_ids.to_vec()))
        .order_by_desc(Column::PeriodEnd)
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
) -> anyhow::Result<Option<SalesRecord>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &SalesRecord) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active_model(aggregate).insert(db).await?;
    Ok(uuid)
}

pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &SalesRecord) -> anyhow::Result<()> {
    let mut active = to_active_model(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(db).await?;
    Ok(())
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

pub async fn delete_by_listing_ids<C: ConnectionTrait>(
    db: &C,
    listing_ids: &[String],
) -> anyhow::Result<u64> {
    if listing_ids.is_empty() {
        return Ok(0);
    }
    let result = Entity::delete_many()
        .filter(Column::ListingId.is_in(listing_ids.to_vec()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
