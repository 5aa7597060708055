//! Data collection: walk directories and build the statistics tree.
//!
//! This module handles the second stage of the pipeline - scanning a
//! directory and aggregating per-bucket statistics. It provides:
//!
//! - **Counting**: Per-file line counting with binary detection
//! - **Statistics**: Core data structures (`BucketStats`, `FileStats`)
//! - **Scanning**: Recursive, fail-soft tree construction (`scan`, `scan_path`)
//! - **Finalization**: Root stamping and percentages (`StatsTree`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use treeloclib::data::{scan_path, ScanOptions};
//! use treeloclib::query::Metric;
//!
//! let tree = scan_path(".", &ScanOptions::new())?;
//! let pct = tree.percentage_of(tree.root(), "Python", Metric::LineCount)?;
//! ```

pub mod counter;
pub mod scanner;
pub mod stats;
pub mod tree;

pub use counter::{count_file, count_reader, count_text, LineCounts};
pub use scanner::{scan, scan_path, ScanOptions};
pub use stats::{BucketStats, Content, FileStats, Nodes};
pub use tree::{finalize, Percentage, StatsTree, TreeId};
