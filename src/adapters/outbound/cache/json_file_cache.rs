use super::InMemoryDependencyCache;
use crate::asset_analysis::domain::{AssetIdentity, DependencyRecord};
use crate::ports::outbound::DependencyCache;
use crate::shared::error::AnalysisError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// On-disk format version. Stores written with another version are ignored.
pub const CACHE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CacheEnvelope {
    version: u32,
    records: Vec<DependencyRecord>,
}

/// What happened when the store was opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLoadStatus {
    /// No store existed yet
    Empty,
    /// Records were loaded from the store
    Loaded(usize),
    /// The store existed but could not be used; the cache starts cold
    Discarded(String),
}

/// JsonFileDependencyCache - dependency cache persisted as a JSON file
///
/// Records live in memory while the process runs and are written back on
/// [`DependencyCache::persist`]. The file is replaced atomically: a
/// temporary file is written in the same directory and renamed over the
/// store, so a crash mid-write leaves the previous store intact.
///
/// A missing, unreadable, corrupt or version-mismatched store never fails
/// the open; the cache simply starts empty.
#[derive(Debug)]
pub struct JsonFileDependencyCache {
    path: PathBuf,
    records: InMemoryDependencyCache,
    dirty: AtomicBool,
}

impl JsonFileDependencyCache {
    /// Opens (or prepares to create) the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> (Self, CacheLoadStatus) {
        let path = path.into();
        let (records, status) = Self::load(&path);

        let cache = Self {
            path,
            records: InMemoryDependencyCache::with_records(records),
            dirty: AtomicBool::new(false),
        };
        (cache, status)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> (Vec<DependencyRecord>, CacheLoadStatus) {
        if !path.exists() {
            return (Vec::new(), CacheLoadStatus::Empty);
        }

        let content = match read_regular_file(path, "dependency cache") {
            Ok(content) => content,
            Err(e) => return (Vec::new(), CacheLoadStatus::Discarded(e.to_string())),
        };

        let envelope: CacheEnvelope = match serde_json::from_str(&content) {
            Ok(envelope) => envelope,
            Err(e) => {
                return (
                    Vec::new(),
                    CacheLoadStatus::Discarded(format!("store is corrupt: {}", e)),
                )
            }
        };

        if envelope.version != CACHE_FORMAT_VERSION {
            return (
                Vec::new(),
                CacheLoadStatus::Discarded(format!(
                    "store version {} does not match expected version {}",
                    envelope.version, CACHE_FORMAT_VERSION
                )),
            );
        }

        let records: Vec<DependencyRecord> = envelope
            .records
            .into_iter()
            .map(DependencyRecord::normalized)
            .collect();
        let count = records.len();
        (records, CacheLoadStatus::Loaded(count))
    }

    fn write_store(&self) -> Result<()> {
        let mut records = self.records.snapshot();
        records.sort_by(|a, b| a.owner().cmp(b.owner()));

        let envelope = CacheEnvelope {
            version: CACHE_FORMAT_VERSION,
            records,
        };
        let json = serde_json::to_string_pretty(&envelope)?;

        let write_error = |details: String| AnalysisError::FileWriteError {
            path: self.path.clone(),
            details,
        };

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent).map_err(|e| write_error(e.to_string()))?;

        let mut temp =
            tempfile::NamedTempFile::new_in(&parent).map_err(|e| write_error(e.to_string()))?;
        temp.write_all(json.as_bytes())
            .map_err(|e| write_error(e.to_string()))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| write_error(e.to_string()))?;
        temp.persist(&self.path)
            .map_err(|e| write_error(e.error.to_string()))?;

        Ok(())
    }
}

impl DependencyCache for JsonFileDependencyCache {
    fn get(&self, id: &AssetIdentity) -> Option<DependencyRecord> {
        self.records.get(id)
    }

    fn put(&self, record: DependencyRecord) {
        self.records.put(record);
        self.dirty.store(true, Ordering::SeqCst);
    }

    fn invalidate(&self, id: &AssetIdentity) {
        self.records.invalidate(id);
        self.dirty.store(true, Ordering::SeqCst);
    }

    fn clear(&self) {
        self.records.clear();
        self.dirty.store(true, Ordering::SeqCst);
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn persist(&self) -> Result<()> {
        if !self.dirty.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        self.write_store().inspect_err(|_| {
            self.dirty.store(true, Ordering::SeqCst);
        })
    }
}
