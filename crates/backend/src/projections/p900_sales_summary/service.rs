use super::repository;
use crate::domain::a001_product::repository as product_repository;
use crate::shared::data::db::get_connection;
use crate::shared::error::{AppError, AppResult};
use crate::shared::revenue;
use contracts::projections::p900_sales_summary::{PlatformTotalsDto, ProductTotalsDto};
use uuid::Uuid;

/// Итоги по товару: сумма количества и чистой выручки
pub async fn product_totals(product_id: Uuid, caller_id: &str) -> AppResult<ProductTotalsDto> {
    let db = get_connection();

    let product = product_repository::get_by_id(db, product_id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    if product.user_id != caller_id {
        return Err(AppError::Forbidden);
    }

    let row = repository::get_product_totals(&product.to_string_id()).await?;

    Ok(ProductTotalsDto {
        product_id: product.to_string_id(),
        total_sales: row.total_sales,
        total_revenue: revenue::round_money(row.total_revenue),
    })
}

/// Итоги по активным площадкам в области видимости вызывающего
///
/// Доля площадки считается от суммарного gross вызывающего;
/// при нулевом знаменателе доля равна 0, а не NaN.
pub async fn platform_totals(caller_id: &str) -> AppResult<Vec<PlatformTotalsDto>> {
    let rows = repository::get_platform_totals(caller_id).await?;

    let total_revenue: f64 = rows.iter().map(|r| r.revenue).sum();

    let items = rows
        .into_iter()
        .map(|r| PlatformTotalsDto {
            platform_id: r.platform_id,
            name: r.name,
            color: r.color,
            sales: r.sales,
            revenue: revenue::round_money(r.revenue),
            percentage: revenue::percentage_of(r.revenue, total_revenue),
        })
        .collect();

    Ok(items)
}
