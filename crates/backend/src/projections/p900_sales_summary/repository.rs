use anyhow::Result;
use sea_orm::{FromQueryResult, Statement};

use crate::shared::data::db::get_connection;

/// Raw aggregation result: totals for one product
#[derive(Debug, Clone, FromQueryResult)]
pub struct ProductTotalsRow {
    pub total_sales: i64,
    pub total_revenue: f64,
}

/// Суммы quantity / net_revenue по всем размещениям товара
///
/// Товар без размещений или без записей даёт нули, а не ошибку.
pub async fn get_product_totals(product_id: &str) -> Result<ProductTotalsRow> {
    let db = get_connection();

    let sql = r#"
        SELECT
            COALESCE(SUM(s.quantity), 0) AS total_sales,
            COALESCE(SUM(s.net_revenue), 0.0) AS total_revenue
        FROM a003_platform_listing l
        LEFT JOIN a004_sales_record s ON s.listing_id = l.id
        WHERE l.product_id = ?
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [product_id.into()],
    );

    let row = ProductTotalsRow::find_by_statement(stmt).one(db).await?;

    // SUM по пустому множеству строк всё равно возвращает одну строку с NULL,
    // COALESCE приводит её к нулям
    Ok(row.unwrap_or(ProductTotalsRow {
        total_sales: 0,
        total_revenue: 0.0,
    }))
}

/// Raw aggregation result: totals for one platform
#[derive(Debug, Clone, FromQueryResult)]
pub struct PlatformTotalsRow {
    pub platform_id: String,
    pub name: String,
    pub color: Option<String>,
    pub sales: i64,
    pub revenue: f64,
}

/// Суммы quantity / gross_revenue по каждой активной площадке
///
/// Область — размещения товаров одного пользователя.
pub async fn get_platform_totals(user_id: &str) -> Result<Vec<PlatformTotalsRow>> {
    let db = get_connection();

    let sql = r#"
        SELECT
            pl.id AS platform_id,
            pl.name AS name,
            pl.color AS color,
            COALESCE(SUM(s.quantity), 0) AS sales,
            COALESCE(SUM(s.gross_revenue), 0.0) AS revenue
        FROM a002_platform pl
        LEFT JOIN a003_platform_listing l ON l.platform_id = pl.id
        LEFT JOIN a001_product p ON p.id = l.product_id AND p.user_id = ?
        LEFT JOIN a004_sales_record s ON s.listing_id = l.id AND p.id IS NOT NULL
        WHERE pl.is_active = 1
        GROUP BY pl.id, pl.name, pl.color
        ORDER BY revenue DESC, pl.name
    "#;

    let stmt =
        Statement::from_sql_and_values(sea_orm::DatabaseBackend::Sqlite, sql, [user_id.into()]);

    let rows = PlatformTotalsRow::find_by_statement(stmt).all(db).await?;

    Ok(rows)
}
