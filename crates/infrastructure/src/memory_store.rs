use crate::{StorageError, TodoStore};
use async_trait::async_trait;
use domain::Todo;
use tokio::sync::RwLock;

/// プロセス内メモリにコレクションを保持するストア（サーバーレス用）
///
/// 内容はプロセス（Lambda 実行環境）の寿命の間だけ残る。
/// 複数インスタンス間で共有されることはない。
#[derive(Debug, Default)]
pub struct InMemoryStore {
    todos: RwLock<Vec<Todo>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: RwLock::new(todos),
        }
    }
}

#[async_trait]
impl TodoStore for InMemoryStore {
    async fn load(&self) -> Result<Vec<Todo>, StorageError> {
        Ok(self.todos.read().await.clone())
    }

    async fn save(&self, todos: &[Todo]) -> Result<(), StorageError> {
        *self.todos.write().await = todos.to_vec();
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
