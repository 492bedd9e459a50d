use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use contracts::shared::api::ApiResponse;
use contracts::shared::validation::ValidationErrors;

use crate::shared::erp::ErpError;

/// Ошибка обработчика `/api/*`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Ошибка заполнения: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    NotFound(String),

    /// Операция невозможна в текущем состоянии (например, нет остатка)
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Erp(#[from] ErpError),

    #[error("Внутренняя ошибка: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::ok(data)))
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Erp(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Erp(ErpError::Config(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Erp(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!("{} {}", status.as_u16(), message);
        } else {
            tracing::warn!("{} {}", status.as_u16(), message);
        }

        let fields = match self {
            ApiError::Validation(errors) => errors.0,
            _ => Vec::new(),
        };
        let body = ApiResponse::<()>::err(message).with_fields(fields);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::validation::FieldError;

    #[test]
    fn test_status_mapping() {
        let validation = ApiError::Validation(ValidationErrors(vec![FieldError {
            field: "customer".into(),
            message: "Покупатель обязателен".into(),
        }]));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Erp(ErpError::Status { status: 417, message: "x".into() }).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Erp(ErpError::NotFound { doctype: "Item".into(), name: "A".into() }).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Erp(ErpError::Status { status: 404, message: "x".into() }).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_validation_body_carries_fields() {
        let err = ApiError::Validation(ValidationErrors(vec![FieldError {
            field: "items".into(),
            message: "Добавьте хотя бы одну строку".into(),
        }]));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["fields"][0]["field"], "items");
        assert_eq!(body["error"], "Ошибка заполнения: Добавьте хотя бы одну строку");
    }
}
