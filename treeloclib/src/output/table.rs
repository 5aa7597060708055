//! Table-ready data structures for outline output.
//!
//! This module provides `OutlineTable`, a presentation-ready data structure
//! that can be rendered to aligned text or serialized to JSON.
//!
//! The data flow is:
//! 1. Finalized tree (StatsTree)
//! 2. Outline (expanded, ordered, annotated with percentages)
//! 3. OutlineTable (formatted strings for display)
//!
//! OutlineTable is a pure presentation layer - it only formats data, no
//! ordering or percentage logic. All computation happens in the query stage.

use serde::{Deserialize, Serialize};

use crate::query::outline::{BucketCell, Outline, OutlineRow};

/// Indentation per outline level.
const INDENT: &str = "  ";

/// Gap between the label column and the values.
const GAP: &str = "  ";

/// Role of a piece of rendered text, for callers that style output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablePart {
    Title,
    Dir,
    File,
    Value,
    Separator,
    Footer,
}

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Indented node name, directories end with `/`
    pub label: String,
    /// Whether the row is a directory
    pub is_dir: bool,
    /// One `NN.N% Bucket` value per bucket
    pub values: Vec<String>,
}

/// Table-ready outline data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineTable {
    /// Title naming the metric
    pub title: String,
    /// Data rows
    pub rows: Vec<TableRow>,
    /// Root totals per bucket
    pub footer: TableRow,
}

impl OutlineTable {
    /// Create an OutlineTable from an Outline.
    pub fn from_outline(outline: &Outline) -> Self {
        Self::build(outline, false)
    }

    /// Like [`OutlineTable::from_outline`], with every percentage followed by
    /// the `(value/total)` it was computed from.
    pub fn with_counts(outline: &Outline) -> Self {
        Self::build(outline, true)
    }

    fn build(outline: &Outline, counts: bool) -> Self {
        let rows = outline.rows.iter().map(|r| format_row(r, counts)).collect();

        let footer = TableRow {
            label: format!(
                "Total ({} files, {} directories)",
                outline.summary.files, outline.summary.directories
            ),
            is_dir: false,
            values: outline.totals.iter().map(format_total).collect(),
        };

        OutlineTable {
            title: format!("Share of root by {}", outline.metric),
            rows,
            footer,
        }
    }

    /// Width of the label column.
    pub fn label_width(&self) -> usize {
        self.rows
            .iter()
            .chain(std::iter::once(&self.footer))
            .map(|r| r.label.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Render as aligned plain text, one line per row.
    pub fn render(&self) -> String {
        self.render_with(|_, text| text.to_string())
    }

    /// Render as aligned text, passing every piece through `paint`.
    ///
    /// Labels are padded before painting, so escape codes added by `paint`
    /// never shift the value column.
    pub fn render_with<F>(&self, paint: F) -> String
    where
        F: Fn(TablePart, &str) -> String,
    {
        let width = self.label_width();

        let mut out = paint(TablePart::Title, &self.title);
        out.push('\n');

        for row in &self.rows {
            let part = if row.is_dir {
                TablePart::Dir
            } else {
                TablePart::File
            };
            push_line(&mut out, row, width, part, TablePart::Value, &paint);
        }

        out.push_str(&paint(TablePart::Separator, &"-".repeat(width)));
        out.push('\n');
        push_line(
            &mut out,
            &self.footer,
            width,
            TablePart::Footer,
            TablePart::Footer,
            &paint,
        );
        out
    }
}

/// Render an outline straight to text.
pub fn render_outline(outline: &Outline) -> String {
    OutlineTable::from_outline(outline).render()
}

fn push_line<F>(
    out: &mut String,
    row: &TableRow,
    width: usize,
    label_part: TablePart,
    value_part: TablePart,
    paint: &F,
) where
    F: Fn(TablePart, &str) -> String,
{
    if row.values.is_empty() {
        out.push_str(&paint(label_part, &row.label));
    } else {
        let label = format!("{:<width$}", row.label, width = width);
        let values: Vec<String> = row.values.iter().map(|v| paint(value_part, v)).collect();
        out.push_str(&paint(label_part, &label));
        out.push_str(GAP);
        out.push_str(&values.join(GAP));
    }
    out.push('\n');
}

fn format_row(row: &OutlineRow, counts: bool) -> TableRow {
    let mut label = INDENT.repeat(row.depth);
    label.push_str(&row.name);
    if row.is_dir {
        label.push('/');
    }
    if row.collapsed {
        label.push_str(" [+]");
    }

    TableRow {
        label,
        is_dir: row.is_dir,
        values: row.cells.iter().map(|c| format_cell(c, counts)).collect(),
    }
}

fn format_cell(cell: &BucketCell, counts: bool) -> String {
    if counts {
        format!(
            "{}% {} ({}/{})",
            cell.percentage, cell.bucket, cell.value, cell.total
        )
    } else {
        format!("{}% {}", cell.percentage, cell.bucket)
    }
}

fn format_total(cell: &BucketCell) -> String {
    format!("{} {}", cell.value, cell.bucket)
}
