use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a001_product;
use crate::shared::error::{AppError, AppResult};
use crate::system::auth::extractor::CurrentUser;
use contracts::domain::a001_product::aggregate::{Product, ProductDto};

/// GET /api/product
pub async fn list_all(CurrentUser(claims): CurrentUser) -> AppResult<Json<Vec<Product>>> {
    let items = a001_product::service::list_all(&claims.sub).await?;
    Ok(Json(items))
}

/// GET /api/product/:id
pub async fn get_by_id(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::Validation("Invalid ID".into()))?;
    let (product, listings) = a001_product::service::get_by_id(uuid, &claims.sub).await?;
    Ok(Json(json!({ "product": product, "listings": listings })))
}

/// POST /api/product
pub async fn upsert(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<ProductDto>,
) -> AppResult<Json<serde_json::Value>> {
    let id = match dto.id.clone() {
        Some(existing_id) => {
            a001_product::service::update(dto, &claims.sub).await?;
            existing_id
        }
        None => a001_product::service::create(dto, &claims.sub)
            .await?
            .to_string(),
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/product/:id
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<()> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::Validation("Invalid ID".into()))?;
    let deleted = a001_product::service::delete(uuid, &claims.sub).await?;
    if !deleted {
        return Err(AppError::NotFound("Product"));
    }
    Ok(())
}
