use serde::{Deserialize, Serialize};

/// Totals for one product across all of its listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductTotalsDto {
    #[serde(rename = "productId")]
    pub product_id: String,
    /// Sum of quantity across all sales records
    #[serde(rename = "totalSales")]
    pub total_sales: i64,
    /// Sum of net revenue across all sales records
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
}

/// Totals for one active platform across the caller's listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformTotalsDto {
    #[serde(rename = "platformId")]
    pub platform_id: String,
    pub name: String,
    pub color: Option<String>,
    /// Sum of quantity
    pub sales: i64,
    /// Sum of gross revenue
    pub revenue: f64,
    /// Share of the caller's total gross revenue, 0 when the total is 0
    pub percentage: f64,
}
