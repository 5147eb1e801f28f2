use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage.invalid_key")]
    InvalidKey,
    #[error("storage.io_error")]
    Io(#[from] std::io::Error),
}

/// Configuration for the local key/value storage
pub struct StorageConfig {
    pub directory: PathBuf,
}

impl StorageConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

/// String values stored one file per key under a directory.
///
/// Writes go to a temporary file that is renamed over the previous value, so
/// a crash mid-write leaves either the old or the new value on disk.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    directory: PathBuf,
}

impl FileKeyValueStore {
    /// Opens the store, creating its directory when missing
    pub async fn open(config: &StorageConfig) -> Result<Self, StorageError> {
        tokio::fs::create_dir_all(&config.directory).await?;
        Ok(Self {
            directory: config.directory.clone(),
        })
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)?).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey);
        }
        Ok(self.directory.join(format!("{key}.json")))
    }
}
