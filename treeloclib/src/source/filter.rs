//! Entry filtering with fixed ignore lists and glob pattern support.
//!
//! This module decides which directory entries never make it into the
//! statistics tree. An entry is pruned when:
//!
//! - its base name is one of the ignored names (case-insensitive)
//! - its path relative to the scan root matches an exclude glob
//! - it is a file larger than the size limit
//! - it is a file whose extension is one of the ignored extensions
//!
//! Pruned entries contribute nothing to any ancestor's totals.

use std::fmt;
use std::path::Path;

use glob::Pattern;

use crate::error::TreelocError;
use crate::Result;

/// Files larger than this many bytes are skipped (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

const IGNORED_NAMES: &[&str] = &[
    "bin",
    "obj",
    ".git",
    ".vscode",
    "node_modules",
    "dist",
    "__pycache__",
    ".ipynb_checkpoints",
    "package-lock.json",
];

const IGNORED_EXTENSIONS: &[&str] = &[
    ".ini", // Windows
    ".png",
    ".jpg",
    ".jpeg",
    ".json",
    ".dll",
    ".lock",
    ".gitignore",
    ".log",
];

/// Why an entry was left out of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneReason {
    /// Base name is on the ignore list
    IgnoredName,
    /// Relative path matches an exclude pattern
    Excluded,
    /// File exceeds the size limit
    TooLarge,
    /// Extension is on the ignore list
    IgnoredExtension,
    /// Content is not valid text
    Binary,
    /// Neither a regular file nor a directory
    Special,
}

impl fmt::Display for PruneReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PruneReason::IgnoredName => "ignored name",
            PruneReason::Excluded => "excluded by pattern",
            PruneReason::TooLarge => "file too large",
            PruneReason::IgnoredExtension => "ignored extension",
            PruneReason::Binary => "binary content",
            PruneReason::Special => "not a regular file or directory",
        };
        f.write_str(text)
    }
}

/// Configuration for entry filtering.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Base names pruned together with everything below them (lowercase)
    pub ignored_names: Vec<String>,
    /// File extensions pruned, with leading dot (lowercase)
    pub ignored_extensions: Vec<String>,
    /// Largest file size in bytes that is still scanned
    pub max_file_size: u64,
    /// Glob patterns matched against the path relative to the scan root
    pub exclude: Vec<Pattern>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            ignored_names: IGNORED_NAMES.iter().map(|s| s.to_string()).collect(),
            ignored_extensions: IGNORED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            max_file_size: MAX_FILE_SIZE,
            exclude: Vec::new(),
        }
    }
}

impl FilterConfig {
    /// Create a filter config with the default ignore lists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        let pat = Pattern::new(pattern).map_err(|e| TreelocError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.exclude.push(pat);
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Add a base name to the ignore list.
    pub fn ignore_name(mut self, name: &str) -> Self {
        self.ignored_names.push(name.to_lowercase());
        self
    }

    /// Add an extension to the ignore list. A missing leading dot is added.
    pub fn ignore_extension(mut self, extension: &str) -> Self {
        let ext = extension.to_lowercase();
        if ext.starts_with('.') {
            self.ignored_extensions.push(ext);
        } else {
            self.ignored_extensions.push(format!(".{ext}"));
        }
        self
    }

    /// Set the file size limit in bytes.
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Check whether a base name is on the ignore list.
    pub fn is_ignored_name(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.ignored_names.iter().any(|n| *n == lower)
    }

    /// Check whether an entry of any kind is pruned by name or pattern.
    ///
    /// `relative` is the entry's path relative to the scan root; the root
    /// itself has an empty relative path and is never matched by patterns.
    pub fn prune_entry(&self, name: &str, relative: &Path) -> Option<PruneReason> {
        if self.is_ignored_name(name) {
            return Some(PruneReason::IgnoredName);
        }

        if relative.as_os_str().is_empty() {
            return None;
        }

        let path_str = relative.to_string_lossy();
        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return Some(PruneReason::Excluded);
        }

        None
    }

    /// Check whether a regular file is pruned by size or extension.
    pub fn prune_file(&self, name: &str, size: u64) -> Option<PruneReason> {
        if size > self.max_file_size {
            return Some(PruneReason::TooLarge);
        }

        match extension_key(name) {
            Some(ext) if self.ignored_extensions.contains(&ext) => {
                Some(PruneReason::IgnoredExtension)
            }
            _ => None,
        }
    }
}

/// Lowercased extension of a file name, including the leading dot.
///
/// A dotfile without a further extension (`.gitignore`) is its own
/// extension. Names without any dot have none.
pub fn extension_key(name: &str) -> Option<String> {
    match Path::new(name).extension() {
        Some(ext) => Some(format!(".{}", ext.to_string_lossy().to_lowercase())),
        None if name.starts_with('.') && name.len() > 1 => Some(name.to_lowercase()),
        None => None,
    }
}
