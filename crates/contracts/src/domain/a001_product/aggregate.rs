use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::domain::a003_platform_listing::aggregate::ListingDto;
use crate::enums::product_category::ProductCategory;
use crate::enums::product_status::ProductStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор товара
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Цифровой товар пользователя
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(flatten)]
    pub base: BaseAggregate<ProductId>,

    pub title: String,

    pub description: Option<String>,

    pub thumbnail: Option<String>,

    pub category: ProductCategory,

    pub status: ProductStatus,

    #[serde(rename = "downloadUrl")]
    pub download_url: Option<String>,

    /// Размер файла в байтах
    #[serde(rename = "fileSize")]
    pub file_size: Option<i64>,

    pub tags: Vec<String>,

    /// Владелец товара
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl Product {
    /// Создать новый товар для вставки в БД
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        title: String,
        description: Option<String>,
        thumbnail: Option<String>,
        category: ProductCategory,
        status: ProductStatus,
        download_url: Option<String>,
        file_size: Option<i64>,
        tags: Vec<String>,
        user_id: String,
    ) -> Self {
        Self {
            base: BaseAggregate::new(ProductId::new_v4(), code),
            title,
            description,
            thumbnail,
            category,
            status,
            download_url,
            file_size,
            tags,
            user_id,
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Обновить скалярные поля из DTO (владелец не меняется)
    pub fn update_scalars(
        &mut self,
        title: String,
        description: Option<String>,
        thumbnail: Option<String>,
        category: ProductCategory,
        status: ProductStatus,
        download_url: Option<String>,
        file_size: Option<i64>,
        tags: Vec<String>,
    ) {
        self.title = title;
        self.description = description;
        self.thumbnail = thumbnail;
        self.category = category;
        self.status = status;
        self.download_url = download_url;
        self.file_size = file_size;
        self.tags = tags;
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Название товара не может быть пустым".into());
        }
        if let Some(size) = self.file_size {
            if size < 0 {
                return Err("Размер файла не может быть отрицательным".into());
            }
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "product"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления товара
///
/// Категория и статус приходят строковыми кодами и валидируются на сервере,
/// чтобы неизвестное значение давало ошибку валидации, а не ошибку парсинга.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub category: String,
    pub status: Option<String>,
    #[serde(rename = "downloadUrl")]
    pub download_url: Option<String>,
    #[serde(rename = "fileSize")]
    pub file_size: Option<i64>,
    pub tags: Option<Vec<String>>,
    /// Размещения на площадках; None — не трогать, Some — привести к этому набору
    pub listings: Option<Vec<ListingDto>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product::new_for_insert(
            "PRD-1".into(),
            "Guide".into(),
            None,
            None,
            ProductCategory::Ebooks,
            ProductStatus::Draft,
            None,
            None,
            vec![],
            "user-1".into(),
        )
    }

    #[test]
    fn test_validate_requires_title() {
        let mut product = sample();
        assert!(product.validate().is_ok());

        product.title = "   ".into();
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_file_size() {
        let mut product = sample();
        product.file_size = Some(-1);
        assert!(product.validate().is_err());
    }
}
