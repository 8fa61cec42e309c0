//! safy-core
//!
//! Services and persistence contracts for the savings ledger.
//! Depends on safy-domain. No CLI, no terminal I/O, no concrete file
//! formats.

pub mod allocation_service;
pub mod error;
pub mod ledger_service;
pub mod report_service;
pub mod share_service;
pub mod storage;

pub use allocation_service::*;
pub use error::{CoreError, Result};
pub use ledger_service::*;
pub use report_service::*;
pub use share_service::*;
pub use storage::*;
