//! JSON file store with XDG data-directory support.
//!
//! Each record type is kept as a pretty-printed JSON array in its own file
//! under a data directory: `listings.json`, `saved.json` and `presets.json`.
//! On Unix the default directory is `~/.local/share/homes/`.
//!
//! Every operation re-reads the file, so edits made by another process between
//! calls are picked up. Writes are atomic (temp file + rename). Read-modify-write
//! sequences inside one process are serialized by an async mutex.

use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::memory::new_record_id;
use crate::store::{Record, Store};

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "homes";

/// A store that persists one record collection to a JSON file.
///
/// # Example
///
/// ```no_run
/// use homes_store::models::Listing;
/// use homes_store::{JsonFileStore, Store};
///
/// # async fn example() -> homes_store::Result<()> {
/// let dir = JsonFileStore::<Listing>::default_data_dir()?;
/// let store: JsonFileStore<Listing> = JsonFileStore::new(&dir);
/// let listings = store.get_all().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct JsonFileStore<R> {
    /// Path to the collection file.
    path: PathBuf,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> JsonFileStore<R> {
    /// Creates a store for `R` inside the given data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self::with_path(data_dir.join(format!("{}.json", R::COLLECTION)))
    }

    /// Creates a store backed by an explicit file path.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    /// Returns the default XDG data directory.
    ///
    /// On Unix: `~/.local/share/homes`
    /// On macOS: `~/Library/Application Support/homes`
    /// On Windows: `C:\Users\<User>\AppData\Roaming\homes\data`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the home directory cannot be determined.
    pub fn default_data_dir() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or_else(|| {
                StoreError::unavailable("failed to determine data directory: no home directory")
            })?;
        Ok(project_dirs.data_dir().to_path_buf())
    }

    /// Returns the path to the collection file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the collection, returning an empty one if the file doesn't exist.
    async fn load(&self) -> Result<Vec<R>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "collection file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error("read", e)),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            StoreError::unavailable(format!(
                "failed to parse '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Writes the collection atomically, creating the parent directory if needed.
    async fn save(&self, records: &[R]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error("create directory for", e))?;
        }

        let json = serde_json::to_string_pretty(records).map_err(|e| {
            StoreError::unavailable(format!("failed to serialize {}: {}", R::COLLECTION, e))
        })?;

        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &json)
            .await
            .map_err(|e| self.io_error("write", e))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| self.io_error("write", e))?;

        Ok(())
    }

    fn io_error(&self, action: &str, source: io::Error) -> StoreError {
        StoreError::unavailable(format!(
            "failed to {} '{}': {}",
            action,
            self.path.display(),
            source
        ))
    }
}

#[async_trait]
impl<R: Record> Store<R> for JsonFileStore<R> {
    async fn get_all(&self) -> Result<Vec<R>> {
        self.load().await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<R>> {
        let records = self.load().await?;
        Ok(records.into_iter().find(|r| r.id() == id))
    }

    async fn create(&self, draft: R::Draft) -> Result<R> {
        R::validate_draft(&draft)?;

        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        let record = R::from_draft(new_record_id(), draft);
        records.push(record.clone());
        self.save(&records).await?;

        info!(resource = R::RESOURCE, id = record.id(), "created record");
        Ok(record)
    }

    async fn update(&self, id: &str, patch: R::Patch) -> Result<R> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(R::RESOURCE, id))?;

        record.apply_patch(patch);
        let updated = record.clone();
        self.save(&records).await?;

        info!(resource = R::RESOURCE, id, "updated record");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<R> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(R::RESOURCE, id))?;

        let removed = records.remove(index);
        self.save(&records).await?;

        info!(resource = R::RESOURCE, id, "deleted record");
        Ok(removed)
    }
}
