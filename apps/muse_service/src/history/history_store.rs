use std::{
    collections::{BTreeSet, HashSet},
    fs, io,
    path::{Path, PathBuf},
};

use chrono::Utc;

use super::{
    content_record::{ContentDraft, ContentRecord},
    history_export,
};
use crate::core::error::HistoryError;

/// Type filter value that matches every content type.
pub const ALL_TYPES: &str = "All";

/// History persisted as one JSON array. Every operation reads the whole file,
/// changes it in memory and writes it back. There is no locking: two writers
/// racing on the same file lose updates, last writer wins.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `f` against the store on the blocking thread pool.
    pub async fn run<T, F>(&self, f: F) -> Result<T, HistoryError>
    where
        F: FnOnce(&HistoryStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = self.clone();
        Ok(tokio::task::spawn_blocking(move || f(&store)).await?)
    }

    /// Reads the history, reporting unreadable or malformed files.
    pub fn try_load(&self) -> Result<Vec<ContentRecord>, HistoryError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(HistoryError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|source| HistoryError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Reads the history. A missing file is an empty history, and so is a file
    /// that cannot be read or parsed; the latter is logged.
    pub fn load(&self) -> Vec<ContentRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "treating unreadable history as empty");
                Vec::new()
            }
        }
    }

    fn write(&self, records: &[ContentRecord]) -> Result<(), HistoryError> {
        let write_error = |source| HistoryError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json).map_err(write_error)
    }

    /// Saves a draft as a new record with a fresh id, the current time and
    /// `favorite = false`.
    pub fn append(&self, draft: ContentDraft) -> Result<ContentRecord, HistoryError> {
        let mut records = self.load();

        let record = ContentRecord {
            id: next_id(&records),
            draft,
            timestamp: Utc::now().to_rfc3339(),
            favorite: false,
        };
        records.push(record.clone());
        self.write(&records)?;

        tracing::info!(id = record.id, keyword = %record.draft.keyword, "saved content to history");
        Ok(record)
    }

    pub fn get(&self, id: u64) -> Option<ContentRecord> {
        self.load().into_iter().find(|record| record.id == id)
    }

    /// Flips the favorite flag of the first record with `id` and returns the
    /// new value. Unknown ids are ignored.
    pub fn toggle_favorite(&self, id: u64) -> Result<Option<bool>, HistoryError> {
        let mut records = self.load();

        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            return Ok(None);
        };
        record.favorite = !record.favorite;
        let favorite = record.favorite;

        self.write(&records)?;
        Ok(Some(favorite))
    }

    /// Removes the first record with `id`. Returns whether anything was removed.
    pub fn delete(&self, id: u64) -> Result<bool, HistoryError> {
        let mut records = self.load();

        let Some(index) = records.iter().position(|record| record.id == id) else {
            return Ok(false);
        };
        records.remove(index);

        self.write(&records)?;
        tracing::info!(id, "deleted content from history");
        Ok(true)
    }

    /// Removes every record whose id is in `ids` with a single rewrite.
    pub fn bulk_delete(&self, ids: &HashSet<u64>) -> Result<usize, HistoryError> {
        let mut records = self.load();
        let before = records.len();

        records.retain(|record| !ids.contains(&record.id));
        let removed = before - records.len();

        if removed > 0 {
            self.write(&records)?;
        }
        tracing::info!(removed, "bulk deleted content from history");
        Ok(removed)
    }

    pub fn clear_all(&self) -> Result<(), HistoryError> {
        self.write(&[])?;
        tracing::info!("cleared content history");
        Ok(())
    }

    /// Filters the history in memory. `type_filter` of `None` or `"All"`
    /// keeps every type; an empty query matches everything. The query is a
    /// literal substring, whitespace included.
    pub fn search(
        &self,
        query: &str,
        type_filter: Option<&str>,
        favorite_only: bool,
    ) -> Vec<ContentRecord> {
        let needle = query.to_lowercase();
        let type_filter = type_filter.filter(|t| !t.is_empty() && *t != ALL_TYPES);

        self.load()
            .into_iter()
            .filter(|record| !favorite_only || record.favorite)
            .filter(|record| type_filter.map_or(true, |t| record.draft.content_type == t))
            .filter(|record| record.matches(&needle))
            .collect()
    }

    /// Distinct content types present in the history, sorted.
    pub fn content_types(&self) -> Vec<String> {
        self.load()
            .into_iter()
            .map(|record| record.draft.content_type)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn export_as_text(&self) -> String {
        history_export::format_history(&self.load())
    }
}

/// One past the highest id seen, and never below `len + 1`, so ids stay unique
/// after deletions.
fn next_id(records: &[ContentRecord]) -> u64 {
    let max_id = records.iter().map(|record| record.id).max().unwrap_or(0);
    max_id.max(records.len() as u64) + 1
}
