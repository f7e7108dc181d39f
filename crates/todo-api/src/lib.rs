//! HTTP API（axum）
//!
//! `TodoStore` を `AppState` 経由でハンドラに注入します。
//! ストアのロックは await をまたいで保持しないため、各リクエストは
//! 他のリクエストの変更と交錯せずに完了します。

pub mod config;
pub mod error;
pub mod handlers;
pub mod telemetry;

use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use std::sync::{Arc, Mutex, PoisonError};
use todo_domain::TodoStore;

pub use config::{Config, ConfigError, LogFormat};
pub use error::ApiError;

/// 空のストアでルータを構築して返します。
pub fn app() -> Router {
    app_with_state(AppState::default())
}

/// 外部から状態を注入できる版
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root).fallback(handlers::fallback))
        .route("/health", get(handlers::health).fallback(handlers::fallback))
        .route(
            "/todos",
            get(handlers::list_todos)
                .post(handlers::create_todo)
                .fallback(handlers::fallback),
        )
        .route(
            "/todos/:id",
            get(handlers::get_todo)
                .patch(handlers::update_todo)
                .delete(handlers::delete_todo)
                .fallback(handlers::fallback),
        )
        .fallback(handlers::fallback)
        // ボディサイズの上限は設けない
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn(telemetry::log_requests))
        .with_state(state)
}

/// アプリケーションの共有状態
#[derive(Clone, Default)]
pub struct AppState {
    store: Arc<Mutex<TodoStore>>,
}

impl AppState {
    pub fn new(store: TodoStore) -> Self {
        Self { store: Arc::new(Mutex::new(store)) }
    }

    /// ストアをロックしてクロージャを実行します。
    pub fn with_store<R>(&self, f: impl FnOnce(&mut TodoStore) -> R) -> R {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }

    /// 全件を破棄します（テストの初期化用。ルートとしては公開しません）。
    pub fn reset_store(&self) {
        self.with_store(TodoStore::reset);
    }
}
