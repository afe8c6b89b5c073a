use std::path::{Path, PathBuf};

use todo_core::Todo;
use todo_web::AppError;
use tokio::fs;

/// JSON file holding the mirror's collection between restarts.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot, creating an empty one when the file is missing.
    pub async fn load(&self) -> Result<Vec<Todo>, AppError> {
        match fs::read(&self.path).await {
            Ok(content) => Ok(serde_json::from_slice(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                self.save(&[]).await?;
                Ok(Vec::new())
            }
            Err(err) => Err(AppError::StorageError(err)),
        }
    }

    pub async fn save(&self, todos: &[Todo]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(todos)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
