use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::listing_status::ListingStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор размещения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub Uuid);

impl ListingId {
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

impl AggregateId for ListingId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ListingId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Размещение товара на торговой площадке
///
/// Пара (product_id, platform_id) уникальна.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformListing {
    #[serde(flatten)]
    pub base: BaseAggregate<ListingId>,

    /// Владелец — товар (a001_product.id)
    #[serde(rename = "productId")]
    pub product_id: String,

    /// Ссылка на площадку (a002_platform.id)
    #[serde(rename = "platformId")]
    pub platform_id: String,

    pub price: f64,

    pub currency: String,

    #[serde(rename = "productUrl")]
    pub product_url: Option<String>,

    pub status: ListingStatus,

    /// Момент первого перехода в статус SELLING
    #[serde(rename = "listedAt")]
    pub listed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl PlatformListing {
    /// Создать новое размещение для вставки в БД
    ///
    /// Создание сразу в статусе SELLING проставляет listed_at.
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        product_id: String,
        platform_id: String,
        price: f64,
        currency: String,
        product_url: Option<String>,
        status: ListingStatus,
    ) -> Self {
        let listed_at = if status == ListingStatus::Selling {
            Some(chrono::Utc::now())
        } else {
            None
        };
        Self {
            base: BaseAggregate::new(ListingId::new_v4(), code),
            product_id,
            platform_id,
            price,
            currency,
            product_url,
            status,
            listed_at,
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Сменить статус размещения
    ///
    /// Первый переход в SELLING фиксирует listed_at; все прочие переходы
    /// поле не трогают. Ограничений на порядок переходов нет.
    pub fn change_status(&mut self, new_status: ListingStatus) {
        if new_status == ListingStatus::Selling && self.listed_at.is_none() {
            self.listed_at = Some(chrono::Utc::now());
        }
        self.status = new_status;
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.product_id.trim().is_empty() {
            return Err("Не указан товар размещения".into());
        }
        if self.platform_id.trim().is_empty() {
            return Err("Не указана площадка размещения".into());
        }
        if self.price < 0.0 {
            return Err("Цена не может быть отрицательной".into());
        }
        if self.currency.trim().is_empty() {
            return Err("Валюта не может быть пустой".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for PlatformListing {
    type Id = ListingId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn display_name(&self) -> &str {
        &self.base.code
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "platform_listing"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO размещения внутри формы товара
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListingDto {
    #[serde(rename = "platformId")]
    pub platform_id: String,
    pub price: f64,
    pub currency: Option<String>,
    #[serde(rename = "productUrl")]
    pub product_url: Option<String>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(status: ListingStatus) -> PlatformListing {
        PlatformListing::new_for_insert(
            "LST-1".into(),
            "product-1".into(),
            "platform-1".into(),
            20.0,
            "USD".into(),
            None,
            status,
        )
    }

    #[test]
    fn test_create_selling_stamps_listed_at() {
        let listing = sample(ListingStatus::Selling);
        assert!(listing.listed_at.is_some());
    }

    #[test]
    fn test_create_draft_leaves_listed_at_null() {
        let listing = sample(ListingStatus::Draft);
        assert!(listing.listed_at.is_none());
    }

    #[test]
    fn test_first_transition_to_selling_stamps_once() {
        let mut listing = sample(ListingStatus::Draft);
        assert!(listing.listed_at.is_none());

        listing.change_status(ListingStatus::Selling);
        let stamped = listing.listed_at;
        assert!(stamped.is_some());

        // Уход из SELLING и возврат обратно не перезаписывает отметку
        listing.change_status(ListingStatus::Paused);
        assert_eq!(listing.listed_at, stamped);

        listing.change_status(ListingStatus::Selling);
        assert_eq!(listing.listed_at, stamped);
    }

    #[test]
    fn test_other_transitions_leave_listed_at_untouched() {
        let mut listing = sample(ListingStatus::Draft);
        listing.change_status(ListingStatus::Active);
        listing.change_status(ListingStatus::Archived);
        assert!(listing.listed_at.is_none());
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let mut listing = sample(ListingStatus::Draft);
        listing.price = -1.0;
        assert!(listing.validate().is_err());
    }
}
