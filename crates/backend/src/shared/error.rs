use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Ошибки уровня приложения для HTTP-обработчиков
///
/// Превращается в единый JSON-конверт `{"error": "...", "details": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Некорректный ввод (пустое название, неизвестная категория и т.п.)
    #[error("{0}")]
    Validation(String),

    /// Нет идентичности вызывающего
    #[error("Authentication required")]
    Unauthorized,

    /// Идентичность есть, но ресурс принадлежит другому пользователю
    #[error("Access denied")]
    Forbidden,

    /// Ресурс не существует либо недоступен в области видимости вызывающего
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Операция конфликтует с текущим состоянием (например, удаление
    /// площадки с активными размещениями)
    #[error("{0}")]
    Conflict(String),

    /// Ошибка хранилища
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),

    /// Прочие внутренние ошибки
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience type alias for handler return values
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            // Текст внутренних ошибок наружу не отдаём
            AppError::Db(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({ "error": message });

        (status, Json(body)).into_response()
    }
}
