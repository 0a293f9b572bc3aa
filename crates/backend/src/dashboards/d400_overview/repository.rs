use anyhow::Result;
use sea_orm::{FromQueryResult, Statement};

use crate::shared::data::db::get_connection;

/// Raw aggregation result for the dashboard header cards
#[derive(Debug, Clone, FromQueryResult)]
pub struct OverviewTotalsRow {
    pub total_revenue: f64,
    pub total_expense: f64,
    pub net_profit: f64,
    pub total_sales: i64,
}

/// Суммы gross/commission/net/quantity по всем записям пользователя
pub async fn get_overview_totals(user_id: &str) -> Result<OverviewTotalsRow> {
    let db = get_connection();

    let sql = r#"
        SELECT
            COALESCE(SUM(s.gross_revenue), 0.0) AS total_revenue,
            COALESCE(SUM(s.commission_amount), 0.0) AS total_expense,
            COALESCE(SUM(s.net_revenue), 0.0) AS net_profit,
            COALESCE(SUM(s.quantity), 0) AS total_sales
        FROM a004_sales_record s
        JOIN a003_platform_listing l ON s.listing_id = l.id
        JOIN a001_product p ON l.product_id = p.id
        WHERE p.user_id = ?
    "#;

    let stmt =
        Statement::from_sql_and_values(sea_orm::DatabaseBackend::Sqlite, sql, [user_id.into()]);

    let row = OverviewTotalsRow::find_by_statement(stmt).one(db).await?;

    Ok(row.unwrap_or(OverviewTotalsRow {
        total_revenue: 0.0,
        total_expense: 0.0,
        net_profit: 0.0,
        total_sales: 0,
    }))
}

/// Raw row for the recent-sales table
#[derive(Debug, Clone, FromQueryResult)]
pub struct RecentSaleRow {
    pub id: String,
    pub product_title: String,
    pub platform_name: String,
    pub period_end: String,
    pub quantity: i32,
    pub net_revenue: f64,
    pub currency: String,
}

/// Последние записи продаж пользователя с названиями товара и площадки
pub async fn get_recent_sales(user_id: &str, limit: i32) -> Result<Vec<RecentSaleRow>> {
    let db = get_connection();

    let sql = r#"
        SELECT
            s.id AS id,
            p.title AS product_title,
            pl.name AS platform_name,
            s.period_end AS period_end,
            s.quantity AS quantity,
            s.net_revenue AS net_revenue,
            s.currency AS currency
        FROM a004_sales_record s
        JOIN a003_platform_listing l ON s.listing_id = l.id
        JOIN a001_product p ON l.product_id = p.id
        JOIN a002_platform pl ON l.platform_id = pl.id
        WHERE p.user_id = ?
        ORDER BY s.period_end DESC, s.created_at DESC
        LIMIT ?
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [user_id.into(), limit.into()],
    );

    let rows = RecentSaleRow::find_by_statement(stmt).all(db).await?;

    Ok(rows)
}
