use super::repository;
use crate::domain::a001_product::repository as product_repository;
use crate::domain::a002_platform::repository as platform_repository;
use crate::projections::p900_sales_summary::service as summary_service;
use crate::shared::data::db::get_connection;
use crate::shared::error::AppResult;
use crate::shared::revenue;
use contracts::dashboards::d400_overview::{OverviewResponse, OverviewStats, RecentSaleDto};

const RECENT_SALES_LIMIT: i32 = 10;

/// Сводка для главного дашборда
///
/// Все суммы — в области видимости вызывающего; счётчик активных
/// площадок глобальный, т.к. площадки общие для всех пользователей.
pub async fn get_overview(caller_id: &str) -> AppResult<OverviewResponse> {
    let db = get_connection();

    let totals = repository::get_overview_totals(caller_id).await?;
    let active_products = product_repository::count_by_user(db, caller_id).await?;
    let active_platforms = platform_repository::count_active(db).await?;

    let stats = OverviewStats {
        total_revenue: revenue::round_money(totals.total_revenue),
        total_expense: revenue::round_money(totals.total_expense),
        net_profit: revenue::round_money(totals.net_profit),
        active_products,
        total_sales: totals.total_sales,
        active_platforms,
    };

    let recent_sales = repository::get_recent_sales(caller_id, RECENT_SALES_LIMIT)
        .await?
        .into_iter()
        .map(|r| RecentSaleDto {
            id: r.id,
            product_title: r.product_title,
            platform_name: r.platform_name,
            period_end: r.period_end,
            quantity: r.quantity,
            net_revenue: r.net_revenue,
            currency: r.currency,
        })
        .collect();

    let platform_stats = summary_service::platform_totals(caller_id).await?;

    Ok(OverviewResponse {
        stats,
        recent_sales,
        platform_stats,
    })
}
