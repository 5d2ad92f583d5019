use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use super::loader::load_orders;
use super::model::OrderTable;
use crate::error::DashboardError;

/// Session-scoped holder for the loaded table.
///
/// The file is read on the first successful [`DatasetCache::get`] and the
/// table is kept for the lifetime of the cache. A failed read is not cached,
/// so a later call tries again.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    table: OnceCell<OrderTable>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetCache {
            path: path.into(),
            table: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the table has already been read.
    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// The table if it has already been read.
    pub fn loaded(&self) -> Option<&OrderTable> {
        self.table.get()
    }

    /// The cached table, reading the file if this is the first call.
    pub fn get(&self) -> Result<&OrderTable, DashboardError> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }
        let table = load_orders(&self.path)?;
        Ok(self.table.get_or_init(|| table))
    }
}
