//! Savings Core offers the ledger, allocation, and reporting primitives
//! that power savings-dashboard frontends.

pub mod dashboard;

use std::sync::Once;

pub use dashboard::Dashboard;
pub use safy_config::{Config, ConfigError, ConfigManager};
pub use safy_core::{
    AllocationService, CoreError, LedgerService, ReportService, Result, ShareService,
    ShareSnapshot, ShareStore,
};
pub use safy_domain::*;
pub use safy_storage_csv::{codec, CsvShareStore};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("savings_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("Savings Core tracing initialized.");
    });
}
