pub mod a001_product;
pub mod a002_platform;
pub mod a004_sales_record;
pub mod d400_overview;
pub mod p900_sales_summary;
