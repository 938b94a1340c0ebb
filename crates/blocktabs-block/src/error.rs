//! Block error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlockError {
    #[error("Tab error: {0}")]
    Tab(#[from] blocktabs_activation::TabError),

    #[error("Invalid block attributes: {0}")]
    Attributes(#[from] serde_json::Error),

    #[error("Invalid selector: {0}")]
    Selector(String),
}
