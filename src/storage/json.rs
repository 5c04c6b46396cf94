//! JSON file persistence

use std::path::{Path, PathBuf};

use crate::model::EntityKind;
use crate::Result;
use super::{Persister, Snapshot};

/// Writes each table to `<data_dir>/<table>.json`
#[derive(Debug, Clone)]
pub struct JsonFilePersister {
    data_dir: PathBuf,
}

impl JsonFilePersister {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Target file of a table
    pub fn path_for(&self, kind: EntityKind) -> PathBuf {
        table_path(&self.data_dir, kind)
    }
}

/// `<dir>/<table>.json`, shared by the loader and the persister
pub fn table_path(dir: &Path, kind: EntityKind) -> PathBuf {
    dir.join(format!("{}.json", kind.table_name()))
}

impl Persister for JsonFilePersister {
    fn write_table(&self, snapshot: &Snapshot) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;

        let path = self.path_for(snapshot.kind());
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(snapshot)?;

        // Rename over the old file so readers never see a half-written table
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;

        if snapshot.is_empty() {
            tracing::debug!("Empty {} table saved to: {}", snapshot.kind(), path.display());
        } else {
            tracing::debug!("Data saved to: {} ({} rows)", path.display(), snapshot.len());
        }
        Ok(())
    }
}
