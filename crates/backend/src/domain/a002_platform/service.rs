use super::repository;
use crate::domain::a003_platform_listing::repository as listing_repository;
use crate::shared::data::db::get_connection;
use crate::shared::error::{AppError, AppResult};
use contracts::domain::a002_platform::aggregate::{Platform, PlatformDto};
use uuid::Uuid;

/// Создание новой площадки
pub async fn create(dto: PlatformDto) -> AppResult<Uuid> {
    let db = get_connection();

    // Slug уникален среди всех площадок
    if repository::get_by_slug(db, &dto.slug).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Platform with slug '{}' already exists",
            dto.slug
        )));
    }

    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("PLT-{}", Uuid::new_v4()));
    let mut aggregate = Platform::new_for_insert(
        code,
        dto.name,
        dto.slug,
        dto.commission_rate,
        dto.default_currency,
        dto.color,
    );
    if let Some(is_active) = dto.is_active {
        aggregate.is_active = is_active;
    }

    aggregate.validate().map_err(AppError::Validation)?;

    aggregate.before_write();

    let id = repository::insert(db, &aggregate).await?;
    Ok(id)
}

/// Обновление существующей площадки
pub async fn update(dto: PlatformDto) -> AppResult<()> {
    let db = get_connection();

    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound("Platform"))?;

    // Slug может смениться, но не на занятый другой площадкой
    if let Some(other) = repository::get_by_slug(db, &dto.slug).await? {
        if other.base.id != aggregate.base.id {
            return Err(AppError::Conflict(format!(
                "Platform with slug '{}' already exists",
                dto.slug
            )));
        }
    }

    aggregate.update(&dto);

    aggregate.validate().map_err(AppError::Validation)?;

    aggregate.before_write();

    repository::update(db, &aggregate).await?;
    Ok(())
}

/// Удаление площадки
///
/// Блокируется, пока на площадку ссылается хотя бы одно размещение.
pub async fn delete(id: Uuid) -> AppResult<bool> {
    let db = get_connection();

    let references = listing_repository::count_by_platform(db, &id.to_string()).await?;
    if references > 0 {
        return Err(AppError::Conflict(
            "Platform is referenced by listings and cannot be deleted".into(),
        ));
    }

    let deleted = repository::delete(db, id).await?;
    Ok(deleted)
}

/// Получение площадки по ID
pub async fn get_by_id(id: Uuid) -> AppResult<Option<Platform>> {
    let db = get_connection();
    Ok(repository::get_by_id(db, id).await?)
}

/// Получение списка всех площадок
pub async fn list_all() -> AppResult<Vec<Platform>> {
    let db = get_connection();
    Ok(repository::list_all(db).await?)
}

/// Вставка тестовых данных
pub async fn insert_test_data() -> AppResult<()> {
    let data = vec![
        PlatformDto {
            id: None,
            code: Some("plt-etsy".into()),
            name: "Etsy".into(),
            slug: "etsy".into(),
            commission_rate: 6.5,
            default_currency: "USD".into(),
            color: Some("#F1641E".into()),
            is_active: Some(true),
        },
        PlatformDto {
            id: None,
            code: Some("plt-gumroad".into()),
            name: "Gumroad".into(),
            slug: "gumroad".into(),
            commission_rate: 10.0,
            default_currency: "USD".into(),
            color: Some("#FF90E8".into()),
            is_active: Some(true),
        },
        PlatformDto {
            id: None,
            code: Some("plt-kdp".into()),
            name: "Amazon KDP".into(),
            slug: "amazon-kdp".into(),
            commission_rate: 30.0,
            default_currency: "USD".into(),
            color: Some("#FF9900".into()),
            is_active: Some(true),
        },
        PlatformDto {
            id: None,
            code: Some("plt-creative".into()),
            name: "Creative Market".into(),
            slug: "creative-market".into(),
            commission_rate: 40.0,
            default_currency: "USD".into(),
            color: Some("#8BA753".into()),
            is_active: Some(true),
        },
        PlatformDto {
            id: None,
            code: Some("plt-bandcamp".into()),
            name: "Bandcamp".into(),
            slug: "bandcamp".into(),
            commission_rate: 15.0,
            default_currency: "USD".into(),
            color: Some("#629AA9".into()),
            is_active: Some(true),
        },
    ];

    for dto in data {
        // Повторный запуск не должен падать на занятых slug
        match create(dto).await {
            Ok(_) | Err(AppError::Conflict(_)) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
