//! Tab error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(String),

    #[error("Tab index {index} out of range for {len} tabs")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Duplicate tab id: {0}")]
    DuplicateId(String),

    #[error("Tab id cannot be empty")]
    EmptyId,
}
