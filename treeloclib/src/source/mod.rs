//! Source rules: decide what gets scanned and how it is classified.
//!
//! This module handles the first stage of the pipeline - the fixed rules
//! that shape a scan. It provides:
//!
//! - **Filtering**: ignored names, ignored extensions, size limit, glob excludes
//! - **Languages**: the ordered extension-to-bucket table
//!
//! ## Example
//!
//! ```rust
//! use treeloclib::source::{FilterConfig, LanguageTable};
//!
//! let filter = FilterConfig::new().exclude("**/generated/**").unwrap();
//! let languages = LanguageTable::default();
//! assert_eq!(languages.classify(".py"), "Python");
//! ```

pub mod filter;
pub mod language;

pub use filter::{extension_key, FilterConfig, PruneReason, MAX_FILE_SIZE};
pub use language::{Language, LanguageTable, OTHER_BUCKET};
