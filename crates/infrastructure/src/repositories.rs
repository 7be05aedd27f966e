use crate::{InMemoryStore, JsonFileStore, StorageError};
use async_trait::async_trait;
use domain::Todo;
use shared::{Config, DeploymentMode};
use std::sync::Arc;

/// Todo コレクションの保存先
///
/// コレクションは常に一括で読み書きする。部分的な更新はない。
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// コレクション全体を挿入順で読み込む
    async fn load(&self) -> Result<Vec<Todo>, StorageError>;

    /// コレクション全体を書き込む（既存内容は置き換え）
    async fn save(&self, todos: &[Todo]) -> Result<(), StorageError>;

    /// ログ・ヘルスチェック用の種別名
    fn kind(&self) -> &'static str;
}

/// デプロイモードに応じたストアを開く
///
/// ファイルモードでは起動時にデータファイルを初期化する。
pub async fn open_store(config: &Config) -> Result<Arc<dyn TodoStore>, StorageError> {
    let store: Arc<dyn TodoStore> = match config.mode {
        DeploymentMode::Local => {
            let store = JsonFileStore::new(&config.data_file);
            store.init().await?;
            Arc::new(store)
        }
        DeploymentMode::Serverless => Arc::new(InMemoryStore::new()),
    };

    tracing::info!(
        mode = config.mode.as_str(),
        storage = store.kind(),
        "Todo store opened"
    );
    Ok(store)
}
