pub mod a001_product;
pub mod a002_platform;
pub mod a003_platform_listing;
pub mod a004_sales_record;
