use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор записи продаж
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SalesRecordId(pub Uuid);

impl SalesRecordId {
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

impl AggregateId for SalesRecordId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SalesRecordId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Отчётный период продаж по одному размещению
///
/// commission_amount и net_revenue — производные значения, сервер всегда
/// пересчитывает их из gross_revenue по ставке площадки.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(flatten)]
    pub base: BaseAggregate<SalesRecordId>,

    /// Владелец — размещение (a003_platform_listing.id)
    #[serde(rename = "listingId")]
    pub listing_id: String,

    /// Начало отчётного периода (YYYY-MM-DD)
    #[serde(rename = "periodStart")]
    pub period_start: chrono::NaiveDate,

    /// Конец отчётного периода (YYYY-MM-DD)
    #[serde(rename = "periodEnd")]
    pub period_end: chrono::NaiveDate,

    /// Количество проданных единиц
    pub quantity: i32,

    #[serde(rename = "grossRevenue")]
    pub gross_revenue: f64,

    #[serde(rename = "commissionAmount")]
    pub commission_amount: f64,

    #[serde(rename = "netRevenue")]
    pub net_revenue: f64,

    pub currency: String,

    pub notes: Option<String>,
}

impl SalesRecord {
    /// Создать новую запись продаж для вставки в БД
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        listing_id: String,
        period_start: chrono::NaiveDate,
        period_end: chrono::NaiveDate,
        quantity: i32,
        gross_revenue: f64,
        commission_amount: f64,
        net_revenue: f64,
        currency: String,
        notes: Option<String>,
    ) -> Self {
        Self {
            base: BaseAggregate::new(SalesRecordId::new_v4(), code),
            listing_id,
            period_start,
            period_end,
            quantity,
            gross_revenue,
            commission_amount,
            net_revenue,
            currency,
            notes,
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.quantity < 0 {
            return Err("Количество не может быть отрицательным".into());
        }
        if self.gross_revenue < 0.0 {
            return Err("Валовая выручка не может быть отрицательной".into());
        }
        if self.commission_amount < 0.0 {
            return Err("Комиссия не может быть отрицательной".into());
        }
        if self.period_end < self.period_start {
            return Err("Конец периода раньше его начала".into());
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

impl AggregateRoot for SalesRecord {
    type Id = SalesRecordId;

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
        "a004"
    }

    fn collection_name() -> &'static str {
        "sales_record"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления записи продаж
///
/// grossRevenue — ручной ввод либо None (тогда выручка выводится из
/// quantity × цена размещения). commissionAmount/netRevenue клиент может
/// прислать, но сервер их игнорирует и пересчитывает сам.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SalesRecordDto {
    pub id: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "listingId")]
    pub listing_id: String,
    #[serde(rename = "periodStart")]
    pub period_start: chrono::NaiveDate,
    #[serde(rename = "periodEnd")]
    pub period_end: chrono::NaiveDate,
    pub quantity: i32,
    #[serde(rename = "grossRevenue")]
    pub gross_revenue: Option<f64>,
    #[serde(rename = "commissionAmount")]
    pub commission_amount: Option<f64>,
    #[serde(rename = "netRevenue")]
    pub net_revenue: Option<f64>,
    pub currency: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> SalesRecord {
        SalesRecord::new_for_insert(
            "SAL-1".into(),
            "listing-1".into(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            3,
            60.0,
            3.9,
            56.1,
            "USD".into(),
            None,
        )
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_quantity() {
        let mut record = sample();
        record.quantity = -1;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_period() {
        let mut record = sample();
        record.period_end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert!(record.validate().is_err());
    }
}
