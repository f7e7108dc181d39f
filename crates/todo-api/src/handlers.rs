//! エンドポイントごとのハンドラ
//!
//! ボディは生のバイト列として受け取り、ここで JSON 解釈と検証を行います。
//! 検証はストアに触れる前に完了させます（失敗時は何も変更しません）。

use crate::{error::ApiError, AppState};
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use todo_domain::{format_timestamp, validate_create, validate_update, Todo, TodoId, ValidationErrors};

/// `{"data": ...}` 形式のレスポンス
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
struct WelcomeBody {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    /// サービスの簡易ステータス
    status: &'static str,
    timestamp: String,
}

/// GET /
pub async fn root() -> impl IntoResponse {
    let body = WelcomeBody { message: "Welcome to To-Do Hono API" };
    (StatusCode::OK, Json(body))
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    let body = HealthBody {
        status: "ok",
        timestamp: format_timestamp(&chrono::Utc::now()),
    };
    (StatusCode::OK, Json(body))
}

/// GET /todos（作成順）
pub async fn list_todos(State(state): State<AppState>) -> Json<Data<Vec<Todo>>> {
    let todos = state.with_store(|store| store.list().to_vec());
    tracing::debug!(count = todos.len(), "listing todos");
    Json(Data { data: todos })
}

/// GET /todos/:id
pub async fn get_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Data<Todo>>, ApiError> {
    let id = todo_id(path)?;
    state
        .with_store(|store| store.get(&id).cloned())
        .map(|todo| Json(Data { data: todo }))
        .ok_or(ApiError::NotFound)
}

/// POST /todos
pub async fn create_todo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Data<Todo>>), ApiError> {
    let input = validate_create(&parse_json(&body)?)?;
    let todo = state.with_store(|store| store.create(input));
    tracing::info!(todo_id = %todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(Data { data: todo })))
}

/// PATCH /todos/:id（部分更新）
pub async fn update_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<Data<Todo>>, ApiError> {
    let patch = validate_update(&parse_json(&body)?)?;
    let id = todo_id(path)?;
    let todo = state
        .with_store(|store| store.update(&id, patch))
        .ok_or(ApiError::NotFound)?;
    tracing::info!(todo_id = %todo.id, completed = todo.completed, "todo updated");
    Ok(Json(Data { data: todo }))
}

/// DELETE /todos/:id
pub async fn delete_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = todo_id(path)?;
    if state.with_store(|store| store.delete(&id)) {
        tracing::info!(todo_id = %id, "todo deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// 未定義ルート・未対応メソッド
pub async fn fallback() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "Not Found" })))
}

/// パスの ID を取り出します。
/// 復号できない ID（不正な UTF-8 など）は not found として扱います。
fn todo_id(path: Result<Path<String>, PathRejection>) -> Result<TodoId, ApiError> {
    match path {
        Ok(Path(id)) => Ok(TodoId::from(id)),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "undecodable todo id");
            Err(ApiError::NotFound)
        }
    }
}

fn parse_json(body: &[u8]) -> Result<Value, ValidationErrors> {
    serde_json::from_slice(body).map_err(ValidationErrors::malformed_json)
}
