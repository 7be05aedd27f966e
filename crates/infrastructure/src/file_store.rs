use crate::{StorageError, TodoStore};
use async_trait::async_trait;
use domain::Todo;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// JSON ファイル 1 つにコレクションを保存するストア
///
/// 書き込みはファイル全体の上書きで、アトミックではない。
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// データファイルが無ければ空配列で作成する
    pub async fn init(&self) -> Result<(), StorageError> {
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|source| StorageError::Read {
                path: self.path.clone(),
                source,
            })?;
        if exists {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| self.write_error(source))?;
        }
        self.save(&[]).await?;
        tracing::info!(path = %self.path.display(), "Created empty data file");
        Ok(())
    }

    fn write_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl TodoStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Todo>, StorageError> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Data file missing, using empty collection");
                return Ok(Vec::new());
            }
            Err(source) => {
                tracing::error!(path = %self.path.display(), error = %source, "Error reading todos");
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&data).map_err(|source| {
            tracing::error!(path = %self.path.display(), error = %source, "Malformed todo data");
            StorageError::Malformed {
                path: self.path.clone(),
                source,
            }
        })
    }

    async fn save(&self, todos: &[Todo]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(todos)?;
        fs::write(&self.path, json).await.map_err(|source| {
            tracing::error!(path = %self.path.display(), error = %source, "Error writing todos");
            self.write_error(source)
        })
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}
