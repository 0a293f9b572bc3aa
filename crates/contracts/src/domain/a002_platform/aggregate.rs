use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор торговой площадки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformId(pub Uuid);

impl PlatformId {
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

impl AggregateId for PlatformId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(PlatformId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Торговая площадка (Etsy, Gumroad, Amazon KDP и т.д.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    #[serde(flatten)]
    pub base: BaseAggregate<PlatformId>,

    pub name: String,

    /// Уникальный slug площадки
    pub slug: String,

    /// Комиссия площадки в процентах, 0–100
    #[serde(rename = "commissionRate")]
    pub commission_rate: f64,

    #[serde(rename = "defaultCurrency")]
    pub default_currency: String,

    /// Цвет для отображения в дашбордах
    pub color: Option<String>,

    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl Platform {
    /// Создать новую площадку для вставки в БД
    pub fn new_for_insert(
        code: String,
        name: String,
        slug: String,
        commission_rate: f64,
        default_currency: String,
        color: Option<String>,
    ) -> Self {
        Self {
            base: BaseAggregate::new(PlatformId::new_v4(), code),
            name,
            slug,
            commission_rate,
            default_currency,
            color,
            is_active: true,
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &PlatformDto) {
        self.name = dto.name.clone();
        self.slug = dto.slug.clone();
        self.commission_rate = dto.commission_rate;
        self.default_currency = dto.default_currency.clone();
        self.color = dto.color.clone();
        self.is_active = dto.is_active.unwrap_or(self.is_active);
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Название площадки не может быть пустым".into());
        }
        if self.slug.trim().is_empty() {
            return Err("Slug не может быть пустым".into());
        }
        if !(0.0..=100.0).contains(&self.commission_rate) {
            return Err("Комиссия должна быть в диапазоне 0–100".into());
        }
        if self.default_currency.trim().is_empty() {
            return Err("Валюта по умолчанию не может быть пустой".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Platform {
    type Id = PlatformId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "platform"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления площадки
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlatformDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: String,
    pub slug: String,
    #[serde(rename = "commissionRate")]
    pub commission_rate: f64,
    #[serde(rename = "defaultCurrency")]
    pub default_currency: String,
    pub color: Option<String>,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_commission_rate_bounds() {
        let mut platform = Platform::new_for_insert(
            "PLT-1".into(),
            "Etsy".into(),
            "etsy".into(),
            6.5,
            "USD".into(),
            None,
        );
        assert!(platform.validate().is_ok());

        platform.commission_rate = 100.0;
        assert!(platform.validate().is_ok());

        platform.commission_rate = 100.1;
        assert!(platform.validate().is_err());

        platform.commission_rate = -0.5;
        assert!(platform.validate().is_err());
    }
}
