use serde::{Deserialize, Serialize};

/// Категории цифровых товаров
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Ebooks,
    DigitalProducts,
    DigitalBundles,
    SocialMedia,
    DetectiveProjects,
    MusicProjects,
    GameSell,
}

impl ProductCategory {
    /// Получить код категории
    pub fn code(&self) -> &'static str {
        match self {
            ProductCategory::Ebooks => "EBOOKS",
            ProductCategory::DigitalProducts => "DIGITAL_PRODUCTS",
            ProductCategory::DigitalBundles => "DIGITAL_BUNDLES",
            ProductCategory::SocialMedia => "SOCIAL_MEDIA",
            ProductCategory::DetectiveProjects => "DETECTIVE_PROJECTS",
            ProductCategory::MusicProjects => "MUSIC_PROJECTS",
            ProductCategory::GameSell => "GAME_SELL",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductCategory::Ebooks => "E-books",
            ProductCategory::DigitalProducts => "Digital products",
            ProductCategory::DigitalBundles => "Digital bundles",
            ProductCategory::SocialMedia => "Social media assets",
            ProductCategory::DetectiveProjects => "Detective projects",
            ProductCategory::MusicProjects => "Music projects",
            ProductCategory::GameSell => "Game assets",
        }
    }

    /// Получить все категории
    pub fn all() -> Vec<ProductCategory> {
        vec![
            ProductCategory::Ebooks,
            ProductCategory::DigitalProducts,
            ProductCategory::DigitalBundles,
            ProductCategory::SocialMedia,
            ProductCategory::DetectiveProjects,
            ProductCategory::MusicProjects,
            ProductCategory::GameSell,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "EBOOKS" => Some(ProductCategory::Ebooks),
            "DIGITAL_PRODUCTS" => Some(ProductCategory::DigitalProducts),
            "DIGITAL_BUNDLES" => Some(ProductCategory::DigitalBundles),
            "SOCIAL_MEDIA" => Some(ProductCategory::SocialMedia),
            "DETECTIVE_PROJECTS" => Some(ProductCategory::DetectiveProjects),
            "MUSIC_PROJECTS" => Some(ProductCategory::MusicProjects),
            "GAME_SELL" => Some(ProductCategory::GameSell),
            _ => None,
        }
    }
}

impl ToString for ProductCategory {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for category in ProductCategory::all() {
            assert_eq!(ProductCategory::from_code(category.code()), Some(category));
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(ProductCategory::from_code("FURNITURE"), None);
        assert_eq!(ProductCategory::from_code(""), None);
    }
}
