//! Persistence contract for identifier-addressed share snapshots.

use safy_domain::{AllocationTable, Ledger, ShareId};

use crate::error::Result;

/// A loaded ledger/allocation pair for one share id.
#[derive(Debug, Clone, Default)]
pub struct ShareSnapshot {
    pub ledger: Ledger,
    pub allocations: AllocationTable,
}

/// Abstraction over persistence backends capable of storing share
/// snapshots.
///
/// `save` has full-snapshot semantics: both tables are overwritten, never
/// appended. `load` tolerates either half of the snapshot missing (the
/// missing side comes back empty) and fails with `ShareNotFound` only
/// when no trace of the id exists.
pub trait ShareStore: Send + Sync {
    fn save(&self, id: &ShareId, ledger: &Ledger, allocations: &AllocationTable) -> Result<()>;
    fn load(&self, id: &ShareId) -> Result<ShareSnapshot>;
    fn exists(&self, id: &ShareId) -> bool;
    fn delete(&self, id: &ShareId) -> Result<()>;
}
