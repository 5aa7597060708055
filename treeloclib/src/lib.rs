//! # treeloclib
//!
//! A directory-tree lines of code counter library that breaks every folder
//! down by language and by its share of the whole.
//!
//! ## Overview
//!
//! Point it at a directory and it walks the tree, skipping the usual noise
//! (`.git`, `node_modules`, build output, images, lock files, binaries), and
//! classifies each text file into a language bucket by extension. Every
//! node of the resulting tree carries, per bucket:
//!
//! - **Lines**: number of line terminators
//! - **Non-empty lines**: terminators closing a line with content
//! - **Size**: bytes on disk
//!
//! Directory nodes hold the sums of their children. Once finalized, any
//! node can report what percentage of the root's total it holds for each
//! bucket and metric.
//!
//! ## Pipeline
//!
//! - [`source`]: ignore rules and the language table
//! - [`data`]: counting, scanning and finalization
//! - [`query`]: metric selection and outlines
//! - [`output`]: text tables
//!
//! ## Example
//!
//! ```rust
//! use treeloclib::{scan_path, Metric, ScanOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("a.py"), "import os\n\nos.getcwd()\n").unwrap();
//! fs::create_dir(dir.path().join("sub")).unwrap();
//! fs::write(dir.path().join("sub/b.py"), "print(1)\n").unwrap();
//!
//! let tree = scan_path(dir.path(), &ScanOptions::new()).unwrap();
//! assert_eq!(tree.root().bucket("Python").unwrap().line_count, 4);
//!
//! let sub = tree.root().find("sub").unwrap();
//! let pct = tree.percentage_of(sub, "Python", Metric::LineCount).unwrap();
//! assert_eq!(pct.to_string(), "25.0");
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod query;
pub mod source;

pub use data::{
    count_file, count_text, finalize, scan, scan_path, BucketStats, FileStats, LineCounts,
    Percentage, ScanOptions, StatsTree, TreeId,
};
pub use error::TreelocError;
pub use output::{render_outline, OutlineTable, TablePart};
pub use query::{Metric, OrderBy, OrderDirection, Ordering, Outline, OutlineOptions, TreeSummary};
pub use source::{FilterConfig, Language, LanguageTable};

/// Result type for treeloclib operations
pub type Result<T> = std::result::Result<T, TreelocError>;
