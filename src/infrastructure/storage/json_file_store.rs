//! Snapshot persistence as JSON documents on the local filesystem

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::domain::snapshot::{Report, SnapshotStore};
use crate::shared::config::OutputCfg;
use crate::shared::errors::AppError;

/// Writes each snapshot to a sibling `.tmp` file and renames it into place,
/// so readers never observe a partial document.
pub struct JsonFileStore {
    dir: PathBuf,
    current_file: String,
    last_good_file: String,
}

impl JsonFileStore {
    pub fn new(output: &OutputCfg) -> Self {
        Self {
            dir: output.dir.clone(),
            current_file: output.current_file.clone(),
            last_good_file: output.last_good_file.clone(),
        }
    }

    pub fn current_path(&self) -> PathBuf {
        self.dir.join(&self.current_file)
    }

    pub fn last_good_path(&self) -> PathBuf {
        self.dir.join(&self.last_good_file)
    }

    async fn write_atomic(&self, path: &Path, report: &Report) -> Result<(), AppError> {
        let body = report.to_json()?;
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::PersistenceError(format!("create {}: {}", self.dir.display(), e))
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, body)
            .await
            .map_err(|e| AppError::PersistenceError(format!("write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, path).await.map_err(|e| {
            AppError::PersistenceError(format!(
                "rename {} -> {}: {}",
                tmp.display(),
                path.display(),
                e
            ))
        })?;

        debug!("wrote {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn write_current(&self, report: &Report) -> Result<(), AppError> {
        self.write_atomic(&self.current_path(), report).await
    }

    async fn write_last_good(&self, report: &Report) -> Result<(), AppError> {
        self.write_atomic(&self.last_good_path(), report).await
    }

    async fn load_last_good(&self) -> Result<Option<Report>, AppError> {
        let path = self.last_good_path();
        match fs::read_to_string(&path).await {
            Ok(body) => Ok(Some(serde_json::from_str(&body)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::PersistenceError(format!("read {}: {}", path.display(), e))),
        }
    }
}
