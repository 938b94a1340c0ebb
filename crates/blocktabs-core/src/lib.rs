//! Tabs Block core
//!
//! Page state, configuration and persistence of Tabs instances.
//! Each instance owns its activation state; the page only routes events.

mod config;
mod error;
mod instance;
mod page;
mod store;

pub use config::{Config, DATA_DIR_ENV};
pub use error::CoreError;
pub use instance::TabsInstance;
pub use page::TabsPage;
pub use store::{InstanceStore, InstanceSummary};

// Re-export the layers below
pub use blocktabs_activation::{
    ActivationController, ActivationState, KeyOutcome, Orientation, TabDescriptor, TabError,
    TabKey, TabRegistry, TabView,
};
pub use blocktabs_block::{BlockError, ParsedBlock, TabsAttributes};
pub use blocktabs_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// `RUST_LOG` wins over `default_filter`. A subscriber installed earlier
/// is kept.
pub fn init_logging(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if fmt().with_env_filter(filter).with_target(true).try_init().is_err() {
        tracing::debug!("Logging subscriber already installed, keeping it");
    }
}

/// Open the configured database and wrap it in a store.
pub fn open_store(config: &Config) -> Result<InstanceStore> {
    let db = Database::open(&config.database_path)?;
    Ok(InstanceStore::new(db))
}
