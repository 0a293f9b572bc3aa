use serde::{Deserialize, Serialize};

/// Статус размещения товара на площадке
///
/// Переходы между статусами не ограничены — это метка, а не workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    Draft,
    Active,
    Selling,
    Paused,
    Archived,
}

impl ListingStatus {
    /// Получить код статуса
    pub fn code(&self) -> &'static str {
        match self {
            ListingStatus::Draft => "DRAFT",
            ListingStatus::Active => "ACTIVE",
            ListingStatus::Selling => "SELLING",
            ListingStatus::Paused => "PAUSED",
            ListingStatus::Archived => "ARCHIVED",
        }
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DRAFT" => Some(ListingStatus::Draft),
            "ACTIVE" => Some(ListingStatus::Active),
            "SELLING" => Some(ListingStatus::Selling),
            "PAUSED" => Some(ListingStatus::Paused),
            "ARCHIVED" => Some(ListingStatus::Archived),
            _ => None,
        }
    }
}

impl Default for ListingStatus {
    fn default() -> Self {
        ListingStatus::Draft
    }
}

impl ToString for ListingStatus {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for status in [
            ListingStatus::Draft,
            ListingStatus::Active,
            ListingStatus::Selling,
            ListingStatus::Paused,
            ListingStatus::Archived,
        ] {
            assert_eq!(ListingStatus::from_code(status.code()), Some(status));
        }
    }
}
