//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] blocktabs_storage::StorageError),

    #[error("Tab error: {0}")]
    Tab(#[from] blocktabs_activation::TabError),

    #[error("Block error: {0}")]
    Block(#[from] blocktabs_block::BlockError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tabs instance not found: {0}")]
    InstanceNotFound(String),
}
