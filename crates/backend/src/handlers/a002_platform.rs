use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a002_platform;
use crate::shared::error::{AppError, AppResult};
use crate::system::auth::extractor::CurrentUser;
use contracts::domain::a002_platform::aggregate::{Platform, PlatformDto};
use contracts::system::auth::TokenClaims;

// Справочник площадок общий, менять его могут только администраторы
fn require_admin(claims: &TokenClaims) -> AppResult<()> {
    if !claims.is_admin {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// GET /api/platform
pub async fn list_all(CurrentUser(_claims): CurrentUser) -> AppResult<Json<Vec<Platform>>> {
    let items = a002_platform::service::list_all().await?;
    Ok(Json(items))
}

/// GET /api/platform/:id
pub async fn get_by_id(
    CurrentUser(_claims): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Platform>> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::Validation("Invalid ID".into()))?;
    let platform = a002_platform::service::get_by_id(uuid)
        .await?
        .ok_or(AppError::NotFound("Platform"))?;
    Ok(Json(platform))
}

/// POST /api/platform
pub async fn upsert(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<PlatformDto>,
) -> AppResult<Json<serde_json::Value>> {
    require_admin(&claims)?;
    let id = match dto.id.clone() {
        Some(existing_id) => {
            a002_platform::service::update(dto).await?;
            existing_id
        }
        None => a002_platform::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/platform/:id
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<()> {
    require_admin(&claims)?;
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::Validation("Invalid ID".into()))?;
    let deleted = a002_platform::service::delete(uuid).await?;
    if !deleted {
        return Err(AppError::NotFound("Platform"));
    }
    Ok(())
}

/// POST /api/platform/testdata
pub async fn insert_test_data(CurrentUser(claims): CurrentUser) -> AppResult<()> {
    require_admin(&claims)?;
    a002_platform::service::insert_test_data().await?;
    Ok(())
}
