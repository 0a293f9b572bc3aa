use super::repository;
use crate::domain::a002_platform::repository as platform_repository;
use crate::domain::a003_platform_listing::repository as listing_repository;
use crate::domain::a004_sales_record::repository as sales_repository;
use crate::shared::data::db::get_connection;
use crate::shared::error::{AppError, AppResult};
use contracts::domain::a001_product::aggregate::{Product, ProductDto};
use contracts::domain::a002_platform::aggregate::Platform;
use contracts::domain::a003_platform_listing::aggregate::{ListingDto, PlatformListing};
use contracts::enums::listing_status::ListingStatus;
use contracts::enums::product_category::ProductCategory;
use contracts::enums::product_status::ProductStatus;
use sea_orm::TransactionTrait;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

fn parse_category(code: &str) -> AppResult<ProductCategory> {
    ProductCategory::from_code(code)
        .ok_or_else(|| AppError::Validation(format!("Unknown category: {}", code)))
}

fn parse_product_status(code: Option<&str>) -> AppResult<ProductStatus> {
    match code {
        Some(c) => ProductStatus::from_code(c)
            .ok_or_else(|| AppError::Validation(format!("Unknown status: {}", c))),
        None => Ok(ProductStatus::default()),
    }
}

fn parse_listing_status(code: Option<&str>) -> AppResult<ListingStatus> {
    match code {
        Some(c) => ListingStatus::from_code(c)
            .ok_or_else(|| AppError::Validation(format!("Unknown listing status: {}", c))),
        None => Ok(ListingStatus::default()),
    }
}

/// ID размещений, чья площадка исчезла из сабмита формы
fn removed_listing_ids(existing: &[PlatformListing], submitted_platforms: &HashSet<String>) -> Vec<String> {
    existing
        .iter()
        .filter(|l| !submitted_platforms.contains(&l.platform_id))
        .map(|l| l.to_string_id())
        .collect()
}

/// Проверенный набор размещений из формы товара
struct PreparedListing {
    dto: ListingDto,
    status: ListingStatus,
    platform: Platform,
}

/// Валидация сабмита размещений до открытия транзакции (fail fast)
async fn prepare_listings(dtos: &[ListingDto]) -> AppResult<Vec<PreparedListing>> {
    let db = get_connection();
    let mut seen: HashSet<String> = HashSet::new();
    let mut prepared = Vec::with_capacity(dtos.len());

    for dto in dtos {
        if !seen.insert(dto.platform_id.clone()) {
            return Err(AppError::Validation(format!(
                "Duplicate listing for platform {}",
                dto.platform_id
            )));
        }
        if dto.price < 0.0 {
            return Err(AppError::Validation("Price cannot be negative".into()));
        }

        let status = parse_listing_status(dto.status.as_deref())?;

        let platform_uuid = Uuid::parse_str(&dto.platform_id)
            .map_err(|_| AppError::Validation(format!("Unknown platform: {}", dto.platform_id)))?;
        let platform = platform_repository::get_by_id(db, platform_uuid)
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!("Unknown platform: {}", dto.platform_id))
            })?;

        prepared.push(PreparedListing {
            dto: dto.clone(),
            status,
            platform,
        });
    }

    Ok(prepared)
}

/// Создание нового товара
///
/// Товар и его размещения пишутся одной транзакцией.
pub async fn create(dto: ProductDto, caller_id: &str) -> AppResult<Uuid> {
    let db = get_connection();

    let category = parse_category(&dto.category)?;
    let status = parse_product_status(dto.status.as_deref())?;

    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("PRD-{}", Uuid::new_v4()));
    let mut aggregate = Product::new_for_insert(
        code,
        dto.title.clone(),
        dto.description.clone(),
        dto.thumbnail.clone(),
        category,
        status,
        dto.download_url.clone(),
        dto.file_size,
        dto.tags.clone().unwrap_or_default(),
        caller_id.to_string(),
    );

    aggregate.validate().map_err(AppError::Validation)?;

    let prepared = prepare_listings(dto.listings.as_deref().unwrap_or(&[])).await?;

    aggregate.before_write();

    let txn = db.begin().await.map_err(AppError::Db)?;

    let product_id = repository::insert(&txn, &aggregate).await?;

    for item in &prepared {
        let currency = item
            .dto
            .currency
            .clone()
            .unwrap_or_else(|| item.platform.default_currency.clone());
        let mut listing = PlatformListing::new_for_insert(
            format!("LST-{}", Uuid::new_v4()),
            product_id.to_string(),
            item.platform.to_string_id(),
            item.dto.price,
            currency,
            item.dto.product_url.clone(),
            item.status,
        );
        listing.validate().map_err(AppError::Validation)?;
        listing.before_write();
        listing_repository::insert(&txn, &listing).await?;
    }

    txn.commit().await.map_err(AppError::Db)?;

    Ok(product_id)
}

/// Обновление товара вместе с набором его размещений
///
/// Скалярные поля и diff размещений (удалить исчезнувшие площадки,
/// upsert остальных по паре товар+площадка) применяются атомарно:
/// либо видно всё, либо ничего.
pub async fn update(dto: ProductDto, caller_id: &str) -> AppResult<()> {
    let db = get_connection();

    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    if aggregate.user_id != caller_id {
        return Err(AppError::Forbidden);
    }

    let category = parse_category(&dto.category)?;
    let status = parse_product_status(dto.status.as_deref())?;

    aggregate.update_scalars(
        dto.title.clone(),
        dto.description.clone(),
        dto.thumbnail.clone(),
        category,
        status,
        dto.download_url.clone(),
        dto.file_size,
        dto.tags.clone().unwrap_or_default(),
    );

    aggregate.validate().map_err(AppError::Validation)?;

    // Вся валидация размещений — до открытия транзакции
    let prepared = match dto.listings.as_deref() {
        Some(dtos) => Some(prepare_listings(dtos).await?),
        None => None,
    };

    aggregate.before_write();

    let txn = db.begin().await.map_err(AppError::Db)?;

    repository::update(&txn, &aggregate).await?;

    if let Some(prepared) = prepared {
        let existing = listing_repository::list_by_product(&txn, &aggregate.to_string_id()).await?;
        let existing_by_platform: HashMap<String, PlatformListing> = existing
            .iter()
            .map(|l| (l.platform_id.clone(), l.clone()))
            .collect();
        let submitted_platforms: HashSet<String> = prepared
            .iter()
            .map(|p| p.platform.to_string_id())
            .collect();

        // Площадка убрана из формы — размещение и его продажи удаляются
        let removed = removed_listing_ids(&existing, &submitted_platforms);
        sales_repository::delete_by_listing_ids(&txn, &removed).await?;
        listing_repository::delete_by_ids(&txn, &removed).await?;

        for item in &prepared {
            let platform_id = item.platform.to_string_id();
            match existing_by_platform.get(&platform_id) {
                Some(current) => {
                    let mut listing = current.clone();
                    listing.price = item.dto.price;
                    if let Some(currency) = item.dto.currency.clone() {
                        listing.currency = currency;
                    }
                    listing.product_url = item.dto.product_url.clone();
                    listing.change_status(item.status);
                    listing.validate().map_err(AppError::Validation)?;
                    listing.before_write();
                    listing_repository::update(&txn, &listing).await?;
                }
                None => {
                    let currency = item
                        .dto
                        .currency
                        .clone()
                        .unwrap_or_else(|| item.platform.default_currency.clone());
                    let mut listing = PlatformListing::new_for_insert(
                        format!("LST-{}", Uuid::new_v4()),
                        aggregate.to_string_id(),
                        platform_id,
                        item.dto.price,
                        currency,
                        item.dto.product_url.clone(),
                        item.status,
                    );
                    listing.validate().map_err(AppError::Validation)?;
                    listing.before_write();
                    listing_repository::insert(&txn, &listing).await?;
                }
            }
        }
    }

    txn.commit().await.map_err(AppError::Db)?;

    Ok(())
}

/// Удаление товара каскадом: размещения и их записи продаж
pub async fn delete(id: Uuid, caller_id: &str) -> AppResult<bool> {
    let db = get_connection();

    let aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    if aggregate.user_id != caller_id {
        return Err(AppError::Forbidden);
    }

    let txn = db.begin().await.map_err(AppError::Db)?;

    let listing_ids: Vec<String> =
        listing_repository::list_by_product(&txn, &aggregate.to_string_id())
            .await?
            .into_iter()
            .map(|l| l.to_string_id())
            .collect();

    sales_repository::delete_by_listing_ids(&txn, &listing_ids).await?;
    listing_repository::delete_by_product(&txn, &aggregate.to_string_id()).await?;
    let deleted = repository::delete(&txn, id).await?;

    txn.commit().await.map_err(AppError::Db)?;

    Ok(deleted)
}

/// Товар с размещениями (в области видимости вызывающего)
pub async fn get_by_id(id: Uuid, caller_id: &str) -> AppResult<(Product, Vec<PlatformListing>)> {
    let db = get_connection();

    let aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    if aggregate.user_id != caller_id {
        return Err(AppError::Forbidden);
    }

    let listings = listing_repository::list_by_product(db, &aggregate.to_string_id()).await?;
    Ok((aggregate, listings))
}

/// Список товаров вызывающего
pub async fn list_all(caller_id: &str) -> AppResult<Vec<Product>> {
    let db = get_connection();
    Ok(repository::list_by_user(db, caller_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(platform_id: &str) -> PlatformListing {
        PlatformListing::new_for_insert(
            format!("LST-{}", platform_id),
            "product-1".into(),
            platform_id.into(),
            10.0,
            "USD".into(),
            None,
            ListingStatus::Draft,
        )
    }

    #[test]
    fn test_removed_listing_ids_keeps_submitted() {
        let existing = vec![listing("p1"), listing("p2"), listing("p3")];
        let submitted: HashSet<String> = ["p1".to_string(), "p3".to_string()].into();

        let removed = removed_listing_ids(&existing, &submitted);
        assert_eq!(removed, vec![existing[1].to_string_id()]);
    }

    #[test]
    fn test_removed_listing_ids_empty_submit_removes_all() {
        let existing = vec![listing("p1"), listing("p2")];
        let submitted: HashSet<String> = HashSet::new();

        let removed = removed_listing_ids(&existing, &submitted);
        assert_eq!(removed.len(), 2);
    }

    #[test]
    fn test_removed_listing_ids_no_changes() {
        let existing = vec![listing("p1")];
        let submitted: HashSet<String> = ["p1".to_string()].into();

        assert!(removed_listing_ids(&existing, &submitted).is_empty());
    }

    #[test]
    fn test_parse_category_rejects_unknown() {
        assert!(parse_category("EBOOKS").is_ok());
        assert!(parse_category("FURNITURE").is_err());
    }

    #[test]
    fn test_parse_status_defaults_to_draft() {
        assert_eq!(parse_product_status(None).unwrap(), ProductStatus::Draft);
        assert_eq!(
            parse_listing_status(None).unwrap(),
            ListingStatus::Draft
        );
        assert!(parse_product_status(Some("UNKNOWN")).is_err());
    }
}
