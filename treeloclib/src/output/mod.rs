//! Output formatting: present outlines as text tables.
//!
//! This module handles the final stage of the pipeline - formatting an
//! outline for display. It provides:
//!
//! - **OutlineTable**: Table-ready data with title, indented rows, and footer
//! - **TableRow**: Individual row with label, kind and formatted values
//! - **TablePart**: Role of each rendered piece, for callers adding styles
//!
//! OutlineTable is a pure presentation layer - it only formats data into
//! strings. Expansion, ordering and percentages happen in the query stage.
//!
//! ## Example
//!
//! ```rust,ignore
//! use treeloclib::output::OutlineTable;
//!
//! let table = OutlineTable::from_outline(&outline);
//! // table.rows: [TableRow { label: "  src/", is_dir: true, values: ["42.0% Python"] }]
//! // table.footer: TableRow { label: "Total (5 files, 2 directories)", ... }
//! print!("{}", table.render());
//! ```

pub mod table;

pub use table::{render_outline, OutlineTable, TablePart, TableRow};
