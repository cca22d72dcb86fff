//! Error types for modelsync-core

use thiserror::Error;

use crate::models::NodeId;

/// Result type alias using modelsync-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in modelsync-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A metadata record already exists for the node
    #[error("Node already registered: {0}")]
    AlreadyRegistered(NodeId),

    /// No metadata record exists for the node
    #[error("Node not registered: {0}")]
    NotRegistered(NodeId),
}
