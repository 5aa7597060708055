//! Outline: a finalized tree flattened into display rows.
//!
//! An outline sits between the finalized tree and the final text output.
//! It represents the tree after it has been:
//! - Expanded to the requested depth
//! - Ordered according to the sibling ordering
//! - Annotated with per-bucket percentages for the selected metric
//!
//! Building an outline never touches the tree itself; switching metric just
//! means building another outline from the same tree.

use serde::Serialize;

use crate::data::stats::FileStats;
use crate::data::tree::{Percentage, StatsTree};
use crate::Result;

use super::options::{Metric, OrderBy, OrderDirection, OutlineOptions};

/// One bucket of one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketCell {
    /// Bucket name
    pub bucket: String,
    /// Node's value for the metric
    pub value: u64,
    /// Root's value for the metric
    pub total: u64,
    /// `value` as a share of `total`
    pub percentage: Percentage,
}

/// One node in the outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineRow {
    /// Nesting level, the root is 0
    pub depth: usize,
    /// Base name of the node
    pub name: String,
    /// Whether the node is a directory
    pub is_dir: bool,
    /// Directory with children hidden by the depth limit
    pub collapsed: bool,
    /// Per-bucket cells, in bucket order
    pub cells: Vec<BucketCell>,
}

/// Counts describing a whole tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeSummary {
    /// Number of file nodes
    pub files: usize,
    /// Number of directory nodes, including the root when it is one
    pub directories: usize,
    /// Total bytes of all files
    pub size_bytes: u64,
    /// Number of distinct buckets
    pub buckets: usize,
}

impl TreeSummary {
    pub fn of(tree: &StatsTree) -> Self {
        let root = tree.root();
        let (files, directories) = root.iter().fold((0, 0), |(f, d), node| {
            if node.is_dir() {
                (f, d + 1)
            } else {
                (f + 1, d)
            }
        });

        Self {
            files,
            directories,
            size_bytes: root.size_bytes(),
            buckets: root.content().len(),
        }
    }
}

/// A finalized tree flattened into rows for one metric.
#[derive(Debug, Clone, Serialize)]
pub struct Outline {
    /// Metric used for every cell
    pub metric: Metric,
    /// Rows in display order, parents before children
    pub rows: Vec<OutlineRow>,
    /// Root totals per bucket
    pub totals: Vec<BucketCell>,
    /// Tree-wide counts
    pub summary: TreeSummary,
}

impl Outline {
    /// Build an outline from a finalized tree.
    pub fn build(tree: &StatsTree, options: &OutlineOptions) -> Result<Self> {
        let mut rows = Vec::new();
        push_rows(tree, tree.root(), 0, options, &mut rows)?;

        let totals = bucket_cells(tree, tree.root(), options.metric)?;

        Ok(Outline {
            metric: options.metric,
            rows,
            totals,
            summary: TreeSummary::of(tree),
        })
    }
}

fn push_rows(
    tree: &StatsTree,
    node: &FileStats,
    depth: usize,
    options: &OutlineOptions,
    rows: &mut Vec<OutlineRow>,
) -> Result<()> {
    let children = node.children().unwrap_or(&[]);
    let expanded = options.max_depth.map_or(true, |max| depth < max);

    rows.push(OutlineRow {
        depth,
        name: node.name().to_string(),
        is_dir: node.is_dir(),
        collapsed: !expanded && !children.is_empty(),
        cells: bucket_cells(tree, node, options.metric)?,
    });

    if expanded {
        for child in ordered(children, options) {
            push_rows(tree, child, depth + 1, options, rows)?;
        }
    }

    Ok(())
}

fn bucket_cells(tree: &StatsTree, node: &FileStats, metric: Metric) -> Result<Vec<BucketCell>> {
    node.content()
        .iter()
        .map(|(bucket, stats)| {
            Ok(BucketCell {
                bucket: bucket.clone(),
                value: stats.get(metric),
                total: tree.root().bucket(bucket).map_or(0, |s| s.get(metric)),
                percentage: tree.percentage_of(node, bucket, metric)?,
            })
        })
        .collect()
}

/// Metric summed over all buckets of a node.
fn metric_total(node: &FileStats, metric: Metric) -> u64 {
    node.content().values().map(|s| s.get(metric)).sum()
}

fn ordered<'a>(children: &'a [FileStats], options: &OutlineOptions) -> Vec<&'a FileStats> {
    let mut sorted: Vec<&FileStats> = children.iter().collect();
    let descending = options.ordering.direction == OrderDirection::Descending;

    let compare = |a: &&FileStats, b: &&FileStats| match options.ordering.by {
        OrderBy::Scan => std::cmp::Ordering::Equal,
        OrderBy::Name => a.name().cmp(b.name()),
        OrderBy::Metric => metric_total(a, options.metric).cmp(&metric_total(b, options.metric)),
    };

    // Stable sort: ties keep scan order in both directions.
    sorted.sort_by(|a, b| {
        let order = compare(a, b);
        if descending {
            order.reverse()
        } else {
            order
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::stats::BucketStats;
    use crate::query::options::Ordering;

    fn sample() -> StatsTree {
        let b = FileStats::file("b.py", "Python", BucketStats::new(5, 5, 100));
        let notes = FileStats::file("notes.md", "Markdown", BucketStats::new(4, 2, 40));
        let sub = FileStats::directory("sub", vec![b, notes]);
        let a = FileStats::file("a.py", "Python", BucketStats::new(10, 8, 200));
        let empty = FileStats::directory("empty", Vec::new());
        StatsTree::new(FileStats::directory("root", vec![sub, a, empty]))
    }

    fn names(outline: &Outline) -> Vec<(usize, &str)> {
        outline
            .rows
            .iter()
            .map(|r| (r.depth, r.name.as_str()))
            .collect()
    }

    #[test]
    fn test_outline_full_depth_scan_order() {
        let outline = Outline::build(&sample(), &OutlineOptions::new()).unwrap();

        assert_eq!(
            names(&outline),
            vec![
                (0, "root"),
                (1, "sub"),
                (2, "b.py"),
                (2, "notes.md"),
                (1, "a.py"),
                (1, "empty"),
            ]
        );
        assert!(outline.rows.iter().all(|r| !r.collapsed));
    }

    #[test]
    fn test_outline_cells() {
        let outline = Outline::build(&sample(), &OutlineOptions::new()).unwrap();

        let sub = &outline.rows[1];
        assert!(sub.is_dir);
        assert_eq!(sub.cells.len(), 2);
        assert_eq!(sub.cells[0].bucket, "Markdown");
        assert_eq!(sub.cells[0].percentage.to_string(), "100.0");
        assert_eq!(sub.cells[1].bucket, "Python");
        assert_eq!(sub.cells[1].value, 5);
        assert_eq!(sub.cells[1].total, 15);
        assert_eq!(sub.cells[1].percentage.to_string(), "33.3");

        let empty = &outline.rows[5];
        assert!(empty.is_dir);
        assert!(empty.cells.is_empty());
    }

    #[test]
    fn test_outline_metric_switch() {
        let tree = sample();
        let lines = Outline::build(&tree, &OutlineOptions::new()).unwrap();
        let bytes =
            Outline::build(&tree, &OutlineOptions::new().metric(Metric::ByteSize)).unwrap();

        assert_eq!(lines.rows[4].cells[0].percentage.to_string(), "66.7");
        assert_eq!(bytes.rows[4].cells[0].percentage.to_string(), "66.7");
        assert_eq!(bytes.rows[4].cells[0].value, 200);

        let non_empty = Outline::build(
            &tree,
            &OutlineOptions::new().metric(Metric::NonEmptyLineCount),
        )
        .unwrap();
        assert_eq!(non_empty.rows[4].cells[0].percentage.to_string(), "61.5");
    }

    #[test]
    fn test_outline_depth_limit() {
        let outline = Outline::build(&sample(), &OutlineOptions::new().max_depth(1)).unwrap();

        assert_eq!(
            names(&outline),
            vec![(0, "root"), (1, "sub"), (1, "a.py"), (1, "empty")]
        );
        assert!(outline.rows[1].collapsed);
        assert!(!outline.rows[2].collapsed);
        assert!(!outline.rows[3].collapsed);

        let root_only = Outline::build(&sample(), &OutlineOptions::new().max_depth(0)).unwrap();
        assert_eq!(root_only.rows.len(), 1);
        assert!(root_only.rows[0].collapsed);
    }

    #[test]
    fn test_outline_ordering() {
        let by_name = Outline::build(
            &sample(),
            &OutlineOptions::new().max_depth(1).ordering(Ordering::by_name()),
        )
        .unwrap();
        assert_eq!(
            names(&by_name),
            vec![(0, "root"), (1, "a.py"), (1, "empty"), (1, "sub")]
        );

        let by_metric = Outline::build(
            &sample(),
            &OutlineOptions::new()
                .max_depth(1)
                .ordering(Ordering::by_metric()),
        )
        .unwrap();
        assert_eq!(
            names(&by_metric),
            vec![(0, "root"), (1, "a.py"), (1, "sub"), (1, "empty")]
        );
    }

    #[test]
    fn test_outline_descending_keeps_scan_order_of_ties() {
        let tie = |name: &str| FileStats::file(name, "Python", BucketStats::new(3, 3, 30));
        let big = FileStats::file("big.py", "Python", BucketStats::new(9, 9, 90));
        let tree = StatsTree::new(FileStats::directory(
            "root",
            vec![tie("first.py"), big, tie("second.py"), tie("third.py")],
        ));

        let outline = Outline::build(
            &tree,
            &OutlineOptions::new().ordering(Ordering::by_metric()),
        )
        .unwrap();
        assert_eq!(
            names(&outline),
            vec![
                (0, "root"),
                (1, "big.py"),
                (1, "first.py"),
                (1, "second.py"),
                (1, "third.py"),
            ]
        );

        let by_name_desc = Outline::build(
            &tree,
            &OutlineOptions::new().ordering(Ordering::by_name().descending()),
        )
        .unwrap();
        assert_eq!(by_name_desc.rows[1].name, "third.py");
        assert_eq!(by_name_desc.rows[4].name, "big.py");

        let scan_desc = Outline::build(
            &tree,
            &OutlineOptions::new().ordering(Ordering::by_scan().descending()),
        )
        .unwrap();
        assert_eq!(scan_desc.rows[1].name, "first.py");
    }

    #[test]
    fn test_outline_totals_and_summary() {
        let outline = Outline::build(&sample(), &OutlineOptions::new()).unwrap();

        let totals: Vec<(&str, u64)> = outline
            .totals
            .iter()
            .map(|c| (c.bucket.as_str(), c.value))
            .collect();
        assert_eq!(totals, vec![("Markdown", 4), ("Python", 15)]);

        assert_eq!(
            outline.summary,
            TreeSummary {
                files: 3,
                directories: 3,
                size_bytes: 340,
                buckets: 2,
            }
        );
    }
}
