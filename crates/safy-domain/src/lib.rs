//! safy-domain
//!
//! Pure domain models for the savings ledger (entries, allocations,
//! reports, session state). No I/O, no storage. Only data types and the
//! arithmetic defined on them.

pub mod allocation;
pub mod entry;
pub mod ledger;
pub mod metrics;
pub mod report;
pub mod session;

pub use allocation::*;
pub use entry::*;
pub use ledger::*;
pub use metrics::*;
pub use report::*;
pub use session::*;
