use serde::{Deserialize, Serialize};

/// Статус товара
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Draft,
    Active,
    Selling,
    Archived,
}

impl ProductStatus {
    /// Получить код статуса
    pub fn code(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "DRAFT",
            ProductStatus::Active => "ACTIVE",
            ProductStatus::Selling => "SELLING",
            ProductStatus::Archived => "ARCHIVED",
        }
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DRAFT" => Some(ProductStatus::Draft),
            "ACTIVE" => Some(ProductStatus::Active),
            "SELLING" => Some(ProductStatus::Selling),
            "ARCHIVED" => Some(ProductStatus::Archived),
            _ => None,
        }
    }
}

impl Default for ProductStatus {
    fn default() -> Self {
        ProductStatus::Draft
    }
}

impl ToString for ProductStatus {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}
