//! Directory scanning: build the statistics tree for a path.
//!
//! The walk is depth-first and single-threaded. Entries are visited in the
//! order the filesystem reports them and symbolic links are never followed.
//! Every per-entry problem is fail-soft: an entry that cannot be read or
//! classified is left out of the tree and the walk carries on.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::TreelocError;
use crate::source::filter::{FilterConfig, PruneReason};
use crate::source::language::LanguageTable;
use crate::Result;

use super::counter::count_file;
use super::stats::{BucketStats, FileStats};
use super::tree::StatsTree;

/// Options for scanning a directory tree.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Which entries are pruned
    pub filter: FilterConfig,
    /// How files are classified into buckets
    pub languages: LanguageTable,
}

impl ScanOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set filter config.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Set the language table.
    pub fn languages(mut self, languages: LanguageTable) -> Self {
        self.languages = languages;
        self
    }
}

/// A directory whose children are still being collected.
struct Frame {
    path: PathBuf,
    name: String,
    children: Vec<FileStats>,
    unreadable: bool,
}

/// Scan `path` into an unfinalized statistics tree.
///
/// Returns `None` when the path itself is pruned or cannot be scanned.
/// Existence of `path` is the caller's concern; see [`scan_path`].
///
/// # Example
///
/// ```rust
/// use treeloclib::{scan, ScanOptions};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("main.py"), "print('hi')\n").unwrap();
/// fs::create_dir(dir.path().join("node_modules")).unwrap();
///
/// let root = scan(dir.path(), &ScanOptions::new()).unwrap();
/// assert_eq!(root.children().unwrap().len(), 1);
/// assert_eq!(root.bucket("Python").unwrap().line_count, 1);
/// ```
pub fn scan(path: impl AsRef<Path>, options: &ScanOptions) -> Option<FileStats> {
    let root = path.as_ref();
    let filter = &options.filter;

    let walker = WalkDir::new(root)
        .follow_links(false)
        .follow_root_links(false)
        .into_iter();

    let mut stack: Vec<Frame> = Vec::new();
    let mut result: Option<FileStats> = None;

    for entry in walker.filter_entry(|e| keep_entry(e, root, filter)) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let path = err.path().map(Path::to_path_buf);
                warn!(error = %err, "skipping unreadable entry");
                // A directory that cannot be listed is reported right after it.
                if let (Some(path), Some(top)) = (path, stack.last_mut()) {
                    if top.path == path {
                        top.unreadable = true;
                    }
                }
                continue;
            }
        };

        close_frames(&mut stack, &mut result, entry.depth());

        let name = entry_name(&entry);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            stack.push(Frame {
                path: entry.path().to_path_buf(),
                name,
                children: Vec::new(),
                unreadable: false,
            });
        } else if file_type.is_file() {
            if let Some(node) = scan_file(&entry, name, options) {
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => result = Some(node),
                }
            }
        } else {
            debug!(path = %entry.path().display(), reason = %PruneReason::Special, "pruned");
        }
    }

    close_frames(&mut stack, &mut result, 0);
    result
}

/// Scan and finalize the tree rooted at `path`.
///
/// Unlike [`scan`], a missing path or a root that is itself pruned (an
/// ignored name, or a symbolic link) is an error here.
pub fn scan_path(path: impl AsRef<Path>, options: &ScanOptions) -> Result<StatsTree> {
    let path = path.as_ref();

    if fs::symlink_metadata(path).is_err() {
        return Err(TreelocError::PathNotFound(path.to_path_buf()));
    }

    scan(path, options)
        .map(StatsTree::new)
        .ok_or_else(|| TreelocError::NothingToScan(path.to_path_buf()))
}

/// Pop every open directory at `depth` or deeper into its parent.
fn close_frames(stack: &mut Vec<Frame>, result: &mut Option<FileStats>, depth: usize) {
    while stack.len() > depth {
        let Some(frame) = stack.pop() else { break };
        if frame.unreadable {
            debug!(path = %frame.path.display(), "dropping unreadable directory");
            continue;
        }
        let node = FileStats::directory(frame.name, frame.children);
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => *result = Some(node),
        }
    }
}

fn keep_entry(entry: &DirEntry, root: &Path, filter: &FilterConfig) -> bool {
    let name = literal_name(entry);
    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());

    match filter.prune_entry(&name, relative) {
        Some(reason) => {
            debug!(path = %entry.path().display(), %reason, "pruned");
            false
        }
        None => true,
    }
}

fn scan_file(entry: &DirEntry, name: String, options: &ScanOptions) -> Option<FileStats> {
    let path = entry.path();

    let size = match entry.metadata() {
        Ok(meta) => meta.len(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "skipping file without metadata");
            return None;
        }
    };

    if let Some(reason) = options.filter.prune_file(&name, size) {
        debug!(path = %path.display(), %reason, size, "pruned");
        return None;
    }

    let counts = match count_file(path) {
        Ok(Some(counts)) => counts,
        Ok(None) => {
            debug!(path = %path.display(), reason = %PruneReason::Binary, "pruned");
            return None;
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "skipping unreadable file");
            return None;
        }
    };

    let bucket = options.languages.classify_name(&name).to_string();
    let stats = BucketStats::new(counts.line_count, counts.non_empty_line_count, size);
    Some(FileStats::file(name, bucket, stats))
}

/// Base name as written. A root of `.` or `..` keeps that spelling, so
/// ignore rules never apply to the directory it resolves to.
fn literal_name(entry: &DirEntry) -> String {
    match entry.path().file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => entry.path().display().to_string(),
    }
}

/// Display name of an entry. The root of a walk started at `.` or `..`
/// gets the name of the directory it resolves to.
fn entry_name(entry: &DirEntry) -> String {
    if entry.depth() == 0 {
        if let Some(name) = entry.path().file_name() {
            return name.to_string_lossy().into_owned();
        }
        if let Ok(canonical) = fs::canonicalize(entry.path()) {
            if let Some(name) = canonical.file_name() {
                return name.to_string_lossy().into_owned();
            }
        }
        return entry.path().display().to_string();
    }
    entry.file_name().to_string_lossy().into_owned()
}
