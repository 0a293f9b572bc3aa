use crate::projections::p900_sales_summary::PlatformTotalsDto;
use serde::{Deserialize, Serialize};

/// Summary cards for the dashboard header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewStats {
    /// Sum of gross revenue across the caller's sales records
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
    /// Sum of platform commissions
    #[serde(rename = "totalExpense")]
    pub total_expense: f64,
    /// Sum of net revenue (= totalRevenue − totalExpense)
    #[serde(rename = "netProfit")]
    pub net_profit: f64,
    /// Number of the caller's products
    #[serde(rename = "activeProducts")]
    pub active_products: i64,
    /// Sum of quantities across the caller's sales records
    #[serde(rename = "totalSales")]
    pub total_sales: i64,
    /// Number of globally active platforms
    #[serde(rename = "activePlatforms")]
    pub active_platforms: i64,
}

/// One row of the recent-sales table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentSaleDto {
    pub id: String,
    #[serde(rename = "productTitle")]
    pub product_title: String,
    #[serde(rename = "platformName")]
    pub platform_name: String,
    #[serde(rename = "periodEnd")]
    pub period_end: String,
    pub quantity: i32,
    #[serde(rename = "netRevenue")]
    pub net_revenue: f64,
    pub currency: String,
}

/// Response for the overview dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub stats: OverviewStats,
    #[serde(rename = "recentSales")]
    pub recent_sales: Vec<RecentSaleDto>,
    #[serde(rename = "platformStats")]
    pub platform_stats: Vec<PlatformTotalsDto>,
}
