//! Finalized trees and percentage-of-root reporting.
//!
//! A freshly scanned tree has no notion of its root. [`finalize`] stamps
//! every node with the [`TreeId`] of the tree it belongs to, and
//! [`StatsTree`] pairs that identity with the owned root node. Percentages
//! are only answered for nodes carrying the tree's own identity.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Serialize, Serializer};

use crate::error::TreelocError;
use crate::query::options::Metric;
use crate::Result;

use super::stats::FileStats;

/// Identity of one finalized tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(u64);

impl TreeId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        TreeId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Stamp every node of `root` with the tree's identity.
///
/// Re-running on an already finalized tree keeps its identity, so every
/// node ends up with the same association as after the first pass. A tree
/// whose nodes carry mixed or missing stamps gets a fresh identity.
pub fn finalize(root: &mut FileStats) -> TreeId {
    if let Some(id) = root.root_id() {
        if root.iter().all(|node| node.root_id() == Some(id)) {
            return id;
        }
    }
    let id = TreeId::next();
    root.stamp(id);
    id
}

/// Share of the root's total, rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Percentage {
    Value(f64),
    /// The root total for the bucket and metric is zero
    NotApplicable,
}

impl Percentage {
    pub fn of(local: u64, total: u64) -> Self {
        if total == 0 {
            return Percentage::NotApplicable;
        }
        let tenths = (local as f64 * 1000.0 / total as f64).round();
        Percentage::Value(tenths / 10.0)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Percentage::Value(v) => Some(*v),
            Percentage::NotApplicable => None,
        }
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percentage::Value(v) => write!(f, "{v:.1}"),
            Percentage::NotApplicable => f.write_str("n/a"),
        }
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Percentage::Value(v) => serializer.serialize_f64(*v),
            Percentage::NotApplicable => serializer.serialize_none(),
        }
    }
}

/// A finalized statistics tree.
///
/// # Example
///
/// ```rust
/// use treeloclib::{BucketStats, FileStats, Metric, StatsTree};
///
/// let child = FileStats::file("a.txt", "Other", BucketStats::new(25, 20, 300));
/// let rest = FileStats::file("b.txt", "Other", BucketStats::new(75, 70, 900));
/// let tree = StatsTree::new(FileStats::directory("root", vec![child, rest]));
///
/// let child = tree.root().find("a.txt").unwrap();
/// let pct = tree.percentage_of(child, "Other", Metric::LineCount).unwrap();
/// assert_eq!(pct.to_string(), "25.0");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct StatsTree {
    #[serde(skip)]
    id: TreeId,
    root: FileStats,
}

impl StatsTree {
    /// Finalize a scanned tree under a new identity.
    ///
    /// Any earlier stamp is replaced, so a subtree taken out of another
    /// tree never answers for its old root.
    pub fn new(mut root: FileStats) -> Self {
        let id = TreeId::next();
        root.stamp(id);
        Self { id, root }
    }

    pub fn id(&self) -> TreeId {
        self.id
    }

    pub fn root(&self) -> &FileStats {
        &self.root
    }

    pub fn into_root(self) -> FileStats {
        self.root
    }

    /// Percentage of the root's total for `bucket` that `node` holds.
    ///
    /// Fails if `node` was not finalized into this tree. A bucket the root
    /// has no total for yields [`Percentage::NotApplicable`].
    pub fn percentage_of(&self, node: &FileStats, bucket: &str, metric: Metric) -> Result<Percentage> {
        self.check_member(node)?;

        let local = node.bucket(bucket).map_or(0, |s| s.get(metric));
        let total = self.root.bucket(bucket).map_or(0, |s| s.get(metric));
        Ok(Percentage::of(local, total))
    }

    /// Percentages for every bucket present at `node`, in bucket order.
    pub fn percentages<'a>(
        &self,
        node: &'a FileStats,
        metric: Metric,
    ) -> Result<Vec<(&'a str, Percentage)>> {
        self.check_member(node)?;

        Ok(node
            .content()
            .iter()
            .map(|(bucket, stats)| {
                let total = self.root.bucket(bucket).map_or(0, |s| s.get(metric));
                (bucket.as_str(), Percentage::of(stats.get(metric), total))
            })
            .collect())
    }

    fn check_member(&self, node: &FileStats) -> Result<()> {
        match node.root_id() {
            None => Err(TreelocError::NotFinalized(node.name().to_string())),
            Some(id) if id != self.id => Err(TreelocError::ForeignNode(node.name().to_string())),
            Some(_) => Ok(()),
        }
    }
}
