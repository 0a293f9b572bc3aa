use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a004_sales_record;
use crate::shared::error::{AppError, AppResult};
use crate::system::auth::extractor::CurrentUser;
use contracts::domain::a004_sales_record::aggregate::{SalesRecord, SalesRecordDto};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub listing_id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
}

/// GET /api/sales_record?listing_id=&product_id=
pub async fn list(
    CurrentUser(claims): CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<SalesRecord>>> {
    let items =
        a004_sales_record::service::list(&claims.sub, query.listing_id, query.product_id).await?;
    Ok(Json(items))
}

/// GET /api/sales_record/:id
pub async fn get_by_id(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<SalesRecord>> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::Validation("Invalid ID".into()))?;
    let record = a004_sales_record::service::get_by_id(uuid, &claims.sub).await?;
    Ok(Json(record))
}

/// POST /api/sales_record
pub async fn upsert(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<SalesRecordDto>,
) -> AppResult<Json<serde_json::Value>> {
    let id = match dto.id.clone() {
        Some(existing_id) => {
            a004_sales_record::service::update(dto, &claims.sub).await?;
            existing_id
        }
        None => a004_sales_record::service::create(dto, &claims.sub)
            .await?
            .to_string(),
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/sales_record/:id
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<()> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::Validation("Invalid ID".into()))?;
    let deleted = a004_sales_record::service::delete(uuid, &claims.sub).await?;
    if !deleted {
        return Err(AppError::NotFound("Sales record"));
    }
    Ok(())
}
