use axum::{extract::Path, Json};

use crate::projections::p900_sales_summary::service;
use crate::shared::error::{AppError, AppResult};
use crate::system::auth::extractor::CurrentUser;
use contracts::projections::p900_sales_summary::{PlatformTotalsDto, ProductTotalsDto};

/// GET /api/p900/product/:id/totals
pub async fn product_totals(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ProductTotalsDto>> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::Validation("Invalid ID".into()))?;
    let totals = service::product_totals(uuid, &claims.sub).await?;
    Ok(Json(totals))
}

/// GET /api/p900/platform-totals
pub async fn platform_totals(
    CurrentUser(claims): CurrentUser,
) -> AppResult<Json<Vec<PlatformTotalsDto>>> {
    let totals = service::platform_totals(&claims.sub).await?;
    Ok(Json(totals))
}
