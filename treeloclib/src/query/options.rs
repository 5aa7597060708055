//! Input options for percentage reporting.
//!
//! This module contains the configuration types that control how a
//! finalized tree is presented: which metric percentages are computed for,
//! how deep the outline expands, and how siblings are ordered.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The quantity percentages are computed for.
///
/// Selection is global: every node and bucket of one report uses the same
/// metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Metric {
    /// Bytes on disk
    ByteSize,
    /// Line terminators
    #[default]
    LineCount,
    /// Line terminators closing a line with content
    NonEmptyLineCount,
}

impl Metric {
    /// All metrics, in selector order.
    pub fn all() -> [Metric; 3] {
        [Metric::ByteSize, Metric::LineCount, Metric::NonEmptyLineCount]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::ByteSize => "size",
            Metric::LineCount => "lines of code",
            Metric::NonEmptyLineCount => "non empty lines of code",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "size" | "bytes" | "byte-size" => Ok(Metric::ByteSize),
            "lines" | "line-count" | "loc" => Ok(Metric::LineCount),
            "non-empty" | "nonempty" | "non-empty-lines" => Ok(Metric::NonEmptyLineCount),
            _ => Err(format!("Unknown metric: {}", s)),
        }
    }
}

/// Field to order siblings by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderBy {
    /// Keep the order the filesystem reported
    #[default]
    Scan,
    /// Order by name (lexicographical)
    Name,
    /// Order by the selected metric summed over all buckets
    Metric,
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scan" | "none" => Ok(OrderBy::Scan),
            "name" | "label" => Ok(OrderBy::Name),
            "metric" | "total" => Ok(OrderBy::Metric),
            _ => Err(format!("Unknown order field: {}", s)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Ascending (A-Z, smallest first)
    #[default]
    Ascending,
    /// Descending (Z-A, largest first)
    Descending,
}

/// Ordering configuration for siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ordering {
    /// Field to order by
    pub by: OrderBy,
    /// Sort direction
    pub direction: OrderDirection,
}

impl Ordering {
    /// Keep scan order (default)
    pub fn by_scan() -> Self {
        Self::default()
    }

    /// Create ordering by name ascending
    pub fn by_name() -> Self {
        Self {
            by: OrderBy::Name,
            direction: OrderDirection::Ascending,
        }
    }

    /// Create ordering by metric, largest first
    pub fn by_metric() -> Self {
        Self {
            by: OrderBy::Metric,
            direction: OrderDirection::Descending,
        }
    }

    /// Set sort direction to ascending
    pub fn ascending(mut self) -> Self {
        self.direction = OrderDirection::Ascending;
        self
    }

    /// Set sort direction to descending
    pub fn descending(mut self) -> Self {
        self.direction = OrderDirection::Descending;
        self
    }
}

/// Options for building an outline from a finalized tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineOptions {
    /// Metric percentages are computed for
    pub metric: Metric,
    /// Deepest level expanded (root is 0); `None` expands everything
    pub max_depth: Option<usize>,
    /// Sibling ordering
    pub ordering: Ordering,
}

impl OutlineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the metric.
    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Limit expansion depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set sibling ordering.
    pub fn ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = ordering;
        self
    }
}
