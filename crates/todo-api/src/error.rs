use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use todo_domain::ValidationErrors;

/// リクエスト境界で返すエラー
///
/// 400（検証エラー）と 404（存在しない ID）はステータスとペイロード形状の両方で区別します。
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Todo not found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                tracing::debug!(error = %errors, "request rejected by validation");
                let body = json!({ "success": false, "error": errors });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::NotFound => {
                let body = json!({ "error": "Todo not found" });
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
        }
    }
}
