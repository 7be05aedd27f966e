//! Todo アプリの HTTP API（axum）
//!
//! `/api/todos` の CRUD と、ブラウザクライアントの静的配信を提供します。
//! ローカルでは HTTP サーバとして、サーバーレスでは Lambda 上で同じルータを使います。

pub mod error;
pub mod handlers;
pub mod models;

use axum::{routing::get, Router};
use infrastructure::{InMemoryStore, TodoStore};
use std::{path::Path, sync::Arc};
use tokio::sync::RwLock;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use error::ApiError;

/// アプリケーションの共有状態
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TodoStore>,
    /// コレクションのロック
    ///
    /// 更新系は読み込み→変更→保存の間 write を保持する。
    /// 参照系は read を取り、書き込み途中のファイルを読まない。
    collection_lock: Arc<RwLock<()>>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            store,
            collection_lock: Arc::new(RwLock::new(())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }
}

/// ルータを構築して返します。
///
/// API 以外のパスは `public_dir` 配下の静的ファイルとして配信します。
pub fn app(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    let api = Router::new()
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/:id",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        );

    Router::new()
        .nest("/api", api)
        .route("/health", get(handlers::health))
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
