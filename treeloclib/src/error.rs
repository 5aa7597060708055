//! Error types for treeloclib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning or reporting
#[derive(Error, Debug)]
pub enum TreelocError {
    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// The root path was pruned or is not a scannable entry
    #[error("nothing to scan at: {0}")]
    NothingToScan(PathBuf),

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Malformed language definition
    #[error("invalid language definition '{spec}': {message}")]
    InvalidLanguage { spec: String, message: String },

    /// A percentage was requested for a node that was never finalized
    #[error("node '{0}' has not been finalized")]
    NotFinalized(String),

    /// A percentage was requested against a tree the node does not belong to
    #[error("node '{0}' belongs to a different tree")]
    ForeignNode(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
