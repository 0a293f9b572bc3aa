use axum::Json;

use crate::dashboards::d400_overview::service;
use crate::shared::error::AppResult;
use crate::system::auth::extractor::CurrentUser;
use contracts::dashboards::d400_overview::OverviewResponse;

/// GET /api/d400/overview
pub async fn get_overview(CurrentUser(claims): CurrentUser) -> AppResult<Json<OverviewResponse>> {
    let overview = service::get_overview(&claims.sub).await?;
    Ok(Json(overview))
}
