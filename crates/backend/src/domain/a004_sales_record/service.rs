use super::repository;
use crate::domain::a001_product::repository as product_repository;
use crate::domain::a002_platform::repository as platform_repository;
use crate::domain::a003_platform_listing::repository as listing_repository;
use crate::shared::data::db::get_connection;
use crate::shared::error::{AppError, AppResult};
use crate::shared::revenue;
use contracts::domain::a003_platform_listing::aggregate::PlatformListing;
use contracts::domain::a004_sales_record::aggregate::{SalesRecord, SalesRecordDto};
use sea_orm::ConnectionTrait;
use uuid::Uuid;

/// Найти размещение и проверить, что его товар принадлежит вызывающему
///
/// Чужое или несуществующее размещение неразличимы для вызывающего —
/// оба дают NotFound, чтобы не допускать перебор чужих идентификаторов.
async fn resolve_owned_listing<C: ConnectionTrait>(
    db: &C,
    listing_id: &str,
    caller_id: &str,
) -> AppResult<PlatformListing> {
    let uuid = Uuid::parse_str(listing_id).map_err(|_| AppError::NotFound("Listing"))?;

    let listing = listing_repository::get_by_id(db, uuid)
        .await?
        .ok_or(AppError::NotFound("Listing"))?;

    let product_uuid =
        Uuid::parse_str(&listing.product_id).map_err(|_| AppError::NotFound("Listing"))?;
    let product = product_repository::get_by_id(db, product_uuid)
        .await?
        .ok_or(AppError::NotFound("Listing"))?;

    if product.user_id != caller_id {
        return Err(AppError::NotFound("Listing"));
    }

    Ok(listing)
}

/// Пересчитать выручку по ставке площадки размещения
///
/// Ручной gross имеет приоритет; иначе gross выводится из
/// quantity × цена размещения. commission/net всегда производные.
async fn recompute_revenue<C: ConnectionTrait>(
    db: &C,
    listing: &PlatformListing,
    quantity: i32,
    manual_gross: Option<f64>,
) -> AppResult<revenue::RevenueBreakdown> {
    let platform_uuid = Uuid::parse_str(&listing.platform_id)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Listing has invalid platform ref: {e}")))?;
    let platform = platform_repository::get_by_id(db, platform_uuid)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Listing references missing platform")))?;

    let breakdown = match manual_gross {
        Some(gross) => revenue::compute_from_gross(gross, platform.commission_rate),
        None => revenue::compute_revenue(quantity, listing.price, platform.commission_rate),
    };
    Ok(breakdown)
}

/// Создание новой записи продаж
pub async fn create(dto: SalesRecordDto, caller_id: &str) -> AppResult<Uuid> {
    let db = get_connection();

    // Валидация до любых записей
    if dto.quantity < 0 {
        return Err(AppError::Validation("Quantity cannot be negative".into()));
    }
    if let Some(gross) = dto.gross_revenue {
        if gross < 0.0 {
            return Err(AppError::Validation(
                "Gross revenue cannot be negative".into(),
            ));
        }
    }

    let listing = resolve_owned_listing(db, &dto.listing_id, caller_id).await?;

    let breakdown = recompute_revenue(db, &listing, dto.quantity, dto.gross_revenue).await?;

    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("SAL-{}", Uuid::new_v4()));
    let currency = dto
        .currency
        .clone()
        .unwrap_or_else(|| listing.currency.clone());

    let mut aggregate = SalesRecord::new_for_insert(
        code,
        listing.to_string_id(),
        dto.period_start,
        dto.period_end,
        dto.quantity,
        breakdown.gross,
        breakdown.commission,
        breakdown.net,
        currency,
        dto.notes.clone(),
    );

    aggregate.validate().map_err(AppError::Validation)?;

    aggregate.before_write();

    let id = repository::insert(db, &aggregate).await?;
    Ok(id)
}

/// Обновление существующей записи продаж
pub async fn update(dto: SalesRecordDto, caller_id: &str) -> AppResult<()> {
    let db = get_connection();

    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::Validation("Invalid ID".into()))?;

    if dto.quantity < 0 {
        return Err(AppError::Validation("Quantity cannot be negative".into()));
    }
    if let Some(gross) = dto.gross_revenue {
        if gross < 0.0 {
            return Err(AppError::Validation(
                "Gross revenue cannot be negative".into(),
            ));
        }
    }

    let mut aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound("Sales record"))?;

    let listing = resolve_owned_listing(db, &aggregate.listing_id, caller_id)
        .await
        .map_err(|e| match e {
            // Чужая запись неотличима от несуществующей
            AppError::NotFound(_) => AppError::NotFound("Sales record"),
            other => other,
        })?;

    // Запись привязана к размещению навсегда
    if dto.listing_id != aggregate.listing_id {
        return Err(AppError::Validation(
            "Sales record cannot be moved to another listing".into(),
        ));
    }

    let breakdown = recompute_revenue(db, &listing, dto.quantity, dto.gross_revenue).await?;

    aggregate.period_start = dto.period_start;
    aggregate.period_end = dto.period_end;
    aggregate.quantity = dto.quantity;
    aggregate.gross_revenue = breakdown.gross;
    aggregate.commission_amount = breakdown.commission;
    aggregate.net_revenue = breakdown.net;
    if let Some(currency) = dto.currency.clone() {
        aggregate.currency = currency;
    }
    aggregate.notes = dto.notes.clone();

    aggregate.validate().map_err(AppError::Validation)?;

    aggregate.before_write();

    repository::update(db, &aggregate).await?;
    Ok(())
}

/// Удаление записи продаж
pub async fn delete(id: Uuid, caller_id: &str) -> AppResult<bool> {
    let db = get_connection();

    let aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound("Sales record"))?;

    resolve_owned_listing(db, &aggregate.listing_id, caller_id)
        .await
        .map_err(|e| match e {
            // Чужая запись неотличима от несуществующей
            AppError::NotFound(_) => AppError::NotFound("Sales record"),
            other => other,
        })?;

    let deleted = repository::delete(db, id).await?;
    Ok(deleted)
}

/// Получение записи по ID (в области видимости вызывающего)
pub async fn get_by_id(id: Uuid, caller_id: &str) -> AppResult<SalesRecord> {
    let db = get_connection();

    let aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound("Sales record"))?;

    resolve_owned_listing(db, &aggregate.listing_id, caller_id)
        .await
        .map_err(|e| match e {
            // Чужая запись неотличима от несуществующей
            AppError::NotFound(_) => AppError::NotFound("Sales record"),
            other => other,
        })?;

    Ok(aggregate)
}

/// Список записей продаж вызывающего
///
/// Фильтры listing_id / product_id сужают область; без фильтров
/// возвращаются записи по всем товарам вызывающего.
pub async fn list(
    caller_id: &str,
    listing_id: Option<String>,
    product_id: Option<String>,
) -> AppResult<Vec<SalesRecord>> {
    let db = get_connection();

    if let Some(listing_id) = listing_id {
        let listing = resolve_owned_listing(db, &listing_id, caller_id).await?;
        return Ok(repository::list_by_listing(db, &listing.to_string_id()).await?);
    }

    let listing_ids: Vec<String> = if let Some(product_id) = product_id {
        let uuid = Uuid::parse_str(&product_id).map_err(|_| AppError::NotFound("Product"))?;
        let product = product_repository::get_by_id(db, uuid)
            .await?
            .ok_or(AppError::NotFound("Product"))?;
        if product.user_id != caller_id {
            return Err(AppError::Forbidden);
        }
        listing_repository::list_by_product(db, &product.to_string_id())
            .await?
            .into_iter()
            .map(|l| l.to_string_id())
            .collect()
    } else {
        let mut ids = Vec::new();
        for product in product_repository::list_by_user(db, caller_id).await? {
            for listing in
                listing_repository::list_by_product(db, &product.to_string_id()).await?
            {
                ids.push(listing.to_string_id());
            }
        }
        ids
    };

    Ok(repository::list_by_listing_ids(db, &listing_ids).await?)
}
