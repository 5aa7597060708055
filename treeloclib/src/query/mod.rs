//! Query processing: turn a finalized tree into percentage reports.
//!
//! This module handles the third stage of the pipeline - reading a
//! finalized tree for one metric. It provides:
//!
//! - **Options**: Metric selection, depth limit and sibling ordering
//! - **Outline**: Flattened rows with per-bucket percentages
//!
//! ## Example
//!
//! ```rust,ignore
//! use treeloclib::query::{Metric, Outline, OutlineOptions};
//!
//! let outline = Outline::build(&tree, &OutlineOptions::new().metric(Metric::ByteSize))?;
//! ```

pub mod options;
pub mod outline;

pub use options::{Metric, OrderBy, OrderDirection, Ordering, OutlineOptions};
pub use outline::{BucketCell, Outline, OutlineRow, TreeSummary};
