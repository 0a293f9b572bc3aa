use chrono::Utc;
use contracts::domain::a001_product::aggregate::{Product, ProductId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::product_category::ProductCategory;
use contracts::enums::product_status::ProductStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub category: String,
    pub status: String,
    pub download_url: Option<String>,
    pub file_size: Option<i64>,
    pub tags: String, // stored as JSON array
    pub user_id: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let category =
            ProductCategory::from_code(&m.category).unwrap_or(ProductCategory::DigitalProducts);
        let status = ProductStatus::from_code(&m.status).unwrap_or_default();
        let tags: Vec<String> = serde_json::from_str(&m.tags).unwrap_or_default();

        Product {
            base: BaseAggregate::with_metadata(ProductId(uuid), m.code, metadata),
            title: m.title,
            description: m.description,
            thumbnail: m.thumbnail,
            category,
            status,
            download_url: m.download_url,
            file_size: m.file_size,
            tags,
            user_id: m.user_id,
        }
    }
}

fn to_active_model(aggregate: &Product) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        title: Set(aggregate.title.clone()),
        description: Set(aggregate.description.clone()),
        thumbnail: Set(aggregate.thumbnail.clone()),
        category: Set(aggregate.category.code().to_string()),
        status: Set(aggregate.status.code().to_string()),
        download_url: Set(aggregate.download_url.clone()),
        file_size: Set(aggregate.file_size),
        tags: Set(serde_json::to_string(&aggregate.tags).unwrap_or_else(|_| "[]".into())),
        user_id: Set(aggregate.user_id.clone()),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_by_user<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
) -> anyhow::Result<Vec<Product>> {
    let mut items: Vec<Product> = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    Ok(items)
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<Option<Product>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn count_by_user<C: ConnectionTrait>(db: &C, user_id: &str) -> anyhow::Result<i64> {
    let count = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .count(db)
        .await?;
    Ok(count as i64)
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Product) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active_model(aggregate).insert(db).await?;
    Ok(uuid)
}

pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &Product) -> anyhow::Result<()> {
    let mut active = to_active_model(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(db).await?;
    Ok(())
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
