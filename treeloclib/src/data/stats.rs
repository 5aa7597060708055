//! Core data structures for the statistics tree.
//!
//! A scan produces a tree of [`FileStats`] nodes. Every node carries a
//! `content` map from bucket name to [`BucketStats`]:
//!
//! - **file nodes** hold at most one entry, their own classified bucket
//! - **directory nodes** hold the entry-wise sum of all their children
//!
//! Directory totals are only ever computed from children, so the additivity
//! invariants hold for every tree built through [`FileStats::directory`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};

use crate::query::options::Metric;

use super::tree::TreeId;

/// Line and byte counts for one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketStats {
    /// Number of line terminators
    pub line_count: u64,
    /// Number of line terminators closing a line with content
    pub non_empty_line_count: u64,
    /// Bytes on disk
    pub size_bytes: u64,
}

impl BucketStats {
    pub fn new(line_count: u64, non_empty_line_count: u64, size_bytes: u64) -> Self {
        Self {
            line_count,
            non_empty_line_count,
            size_bytes,
        }
    }

    /// Value of the selected metric.
    pub fn get(&self, metric: Metric) -> u64 {
        match metric {
            Metric::ByteSize => self.size_bytes,
            Metric::LineCount => self.line_count,
            Metric::NonEmptyLineCount => self.non_empty_line_count,
        }
    }
}

impl Add for BucketStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            line_count: self.line_count + other.line_count,
            non_empty_line_count: self.non_empty_line_count + other.non_empty_line_count,
            size_bytes: self.size_bytes + other.size_bytes,
        }
    }
}

impl AddAssign for BucketStats {
    fn add_assign(&mut self, other: Self) {
        self.line_count += other.line_count;
        self.non_empty_line_count += other.non_empty_line_count;
        self.size_bytes += other.size_bytes;
    }
}

/// Bucket name to counts.
pub type Content = BTreeMap<String, BucketStats>;

/// One node (file or directory) of the statistics tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStats {
    name: String,
    size_bytes: u64,
    /// `None` for files, `Some` (possibly empty) for directories.
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<Vec<FileStats>>,
    content: Content,
    #[serde(skip)]
    root: Option<TreeId>,
}

impl FileStats {
    /// Create a file node classified into a single bucket.
    pub fn file(name: impl Into<String>, bucket: impl Into<String>, stats: BucketStats) -> Self {
        let mut content = Content::new();
        content.insert(bucket.into(), stats);
        Self {
            name: name.into(),
            size_bytes: stats.size_bytes,
            children: None,
            content,
            root: None,
        }
    }

    /// Create a directory node; size and content are summed from `children`.
    pub fn directory(name: impl Into<String>, children: Vec<FileStats>) -> Self {
        let mut size_bytes = 0;
        let mut content = Content::new();

        for child in &children {
            size_bytes += child.size_bytes;
            for (bucket, stats) in &child.content {
                *content.entry(bucket.clone()).or_default() += *stats;
            }
        }

        Self {
            name: name.into(),
            size_bytes,
            children: Some(children),
            content,
            root: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn is_dir(&self) -> bool {
        self.children.is_some()
    }

    pub fn is_file(&self) -> bool {
        self.children.is_none()
    }

    /// Children of a directory node; `None` for files.
    pub fn children(&self) -> Option<&[FileStats]> {
        self.children.as_deref()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Counts for one bucket, if present at this node.
    pub fn bucket(&self, name: &str) -> Option<&BucketStats> {
        self.content.get(name)
    }

    /// Identity of the tree this node was finalized into.
    pub fn root_id(&self) -> Option<TreeId> {
        self.root
    }

    /// Find a descendant (or self) by slash-separated path of names.
    ///
    /// The empty path is this node.
    pub fn find(&self, path: &str) -> Option<&FileStats> {
        let mut node = self;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            node = node.children()?.iter().find(|c| c.name == part)?;
        }
        Some(node)
    }

    /// Depth-first pre-order iteration over this node and all descendants.
    pub fn iter(&self) -> Nodes<'_> {
        Nodes { stack: vec![self] }
    }

    pub(crate) fn stamp(&mut self, id: TreeId) {
        self.root = Some(id);
        if let Some(children) = self.children.as_mut() {
            for child in children {
                child.stamp(id);
            }
        }
    }
}

/// Iterator returned by [`FileStats::iter`].
pub struct Nodes<'a> {
    stack: Vec<&'a FileStats>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a FileStats;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(children) = node.children() {
            self.stack.extend(children.iter().rev());
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn py(name: &str, lines: u64, non_empty: u64, size: u64) -> FileStats {
        FileStats::file(name, "Python", BucketStats::new(lines, non_empty, size))
    }

    #[test]
    fn test_bucket_stats_add() {
        let a = BucketStats::new(10, 8, 200);
        let b = BucketStats::new(5, 5, 100);

        assert_eq!(a + b, BucketStats::new(15, 13, 300));

        let mut c = a;
        c += b;
        assert_eq!(c, BucketStats::new(15, 13, 300));
    }

    #[test]
    fn test_bucket_stats_get() {
        let stats = BucketStats::new(10, 8, 200);

        assert_eq!(stats.get(Metric::LineCount), 10);
        assert_eq!(stats.get(Metric::NonEmptyLineCount), 8);
        assert_eq!(stats.get(Metric::ByteSize), 200);
    }

    #[test]
    fn test_file_node() {
        let file = py("a.py", 3, 2, 40);

        assert!(file.is_file());
        assert!(!file.is_dir());
        assert!(file.children().is_none());
        assert_eq!(file.size_bytes(), 40);
        assert_eq!(file.content().len(), 1);
        assert_eq!(file.bucket("Python"), Some(&BucketStats::new(3, 2, 40)));
        assert_eq!(file.root_id(), None);
    }

    #[test]
    fn test_empty_directory_is_not_a_file() {
        let dir = FileStats::directory("empty", Vec::new());

        assert!(dir.is_dir());
        assert_eq!(dir.children().map(|c| c.len()), Some(0));
        assert_eq!(dir.size_bytes(), 0);
        assert!(dir.content().is_empty());
    }

    #[test]
    fn test_directory_sums_children() {
        let notes = FileStats::file("notes.txt", "Other", BucketStats::new(2, 1, 30));
        let sub = FileStats::directory("sub", vec![py("b.py", 5, 5, 100), notes]);
        let root = FileStats::directory("root", vec![py("a.py", 10, 8, 200), sub]);

        assert_eq!(root.size_bytes(), 330);
        assert_eq!(root.bucket("Python"), Some(&BucketStats::new(15, 13, 300)));
        assert_eq!(root.bucket("Other"), Some(&BucketStats::new(2, 1, 30)));
        assert_eq!(root.content().len(), 2);
    }

    #[test]
    fn test_find_and_iter() {
        let sub = FileStats::directory("sub", vec![py("b.py", 5, 5, 100)]);
        let root = FileStats::directory("root", vec![py("a.py", 10, 8, 200), sub]);

        assert_eq!(root.find("").map(|n| n.name()), Some("root"));
        assert_eq!(root.find("sub/b.py").map(|n| n.size_bytes()), Some(100));
        assert!(root.find("sub/missing.py").is_none());
        assert!(root.find("a.py/deeper").is_none());

        let names: Vec<&str> = root.iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["root", "a.py", "sub", "b.py"]);
    }

    #[test]
    fn test_serialized_shape() {
        let mut root = FileStats::directory("root", vec![py("a.py", 1, 1, 2)]);
        root.stamp(TreeId::next());
        let json = serde_json::to_value(&root).unwrap();

        assert_eq!(json["name"], "root");
        assert_eq!(json["size_bytes"], 2);
        assert!(json.get("root").is_none());
        assert_eq!(json["content"]["Python"]["line_count"], 1);

        let file = &json["children"][0];
        assert_eq!(file["name"], "a.py");
        assert!(file.get("children").is_none());
    }
}
