//! safy-storage-csv
//!
//! Filesystem CSV persistence for share snapshots, plus the import/export
//! codecs for both table schemas.

pub mod codec;

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use safy_core::{CoreError, Result, ShareSnapshot, ShareStore};
use safy_domain::{AllocationTable, Ledger, ShareId};

const SNAPSHOT_EXTENSION: &str = "csv";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed CSV persistence for shared sessions.
///
/// History and allocation snapshots live in two independent directories,
/// one file per share id, overwritten whole on every save. Writes go
/// through a temp file and rename so a crash never leaves a torn
/// snapshot behind.
#[derive(Debug, Clone)]
pub struct CsvShareStore {
    history_dir: PathBuf,
    allocations_dir: PathBuf,
}

impl CsvShareStore {
    pub fn new(history_dir: PathBuf, allocations_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&history_dir)?;
        fs::create_dir_all(&allocations_dir)?;
        Ok(Self {
            history_dir,
            allocations_dir,
        })
    }

    /// Creates `history/` and `allocations/` under one base directory.
    pub fn with_base_dir(base: impl Into<PathBuf>) -> Result<Self> {
        let base = base.into();
        Self::new(base.join("history"), base.join("allocations"))
    }

    pub fn history_path(&self, id: &ShareId) -> PathBuf {
        self.history_dir
            .join(format!("{}.{}", id, SNAPSHOT_EXTENSION))
    }

    pub fn allocations_path(&self, id: &ShareId) -> PathBuf {
        self.allocations_dir
            .join(format!("{}.{}", id, SNAPSHOT_EXTENSION))
    }
}

impl ShareStore for CsvShareStore {
    fn save(&self, id: &ShareId, ledger: &Ledger, allocations: &AllocationTable) -> Result<()> {
        write_snapshot_file(&self.history_path(id), |writer| {
            codec::write_history(writer, ledger)
        })?;
        write_snapshot_file(&self.allocations_path(id), |writer| {
            codec::write_allocations(writer, allocations)
        })?;
        tracing::info!(
            %id,
            entries = ledger.len(),
            categories = allocations.len(),
            "share snapshot written"
        );
        Ok(())
    }

    fn load(&self, id: &ShareId) -> Result<ShareSnapshot> {
        let history_path = self.history_path(id);
        let allocations_path = self.allocations_path(id);
        if !history_path.exists() && !allocations_path.exists() {
            return Err(CoreError::ShareNotFound(id.to_string()));
        }

        let ledger = if history_path.exists() {
            Ledger::from_entries(codec::import_history(&history_path)?)
        } else {
            tracing::warn!(%id, "share has no history snapshot, defaulting to empty");
            Ledger::new()
        };
        let allocations = if allocations_path.exists() {
            codec::import_allocations(&allocations_path)?
        } else {
            tracing::warn!(%id, "share has no allocation snapshot, defaulting to empty");
            AllocationTable::new()
        };
        Ok(ShareSnapshot {
            ledger,
            allocations,
        })
    }

    fn exists(&self, id: &ShareId) -> bool {
        self.history_path(id).exists() || self.allocations_path(id).exists()
    }

    fn delete(&self, id: &ShareId) -> Result<()> {
        for path in [self.history_path(id), self.allocations_path(id)] {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_snapshot_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut Vec<u8>) -> Result<()>,
{
    let mut data = Vec::new();
    write(&mut data)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(&data)?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
