//! Terminal rendering for outline tables using console styles

use clap::ValueEnum;
use console::Style;
use serde::Serialize;
use treeloclib::{Outline, OutlineTable, StatsTree, TablePart};

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    #[default]
    Table,
    Json,
}

/// JSON document: the full tree plus the rows shown for the chosen metric
#[derive(Serialize)]
struct JsonReport<'a> {
    tree: &'a StatsTree,
    outline: &'a Outline,
}

/// Style for each table part; console drops them when stdout is not a terminal
fn style_for(part: TablePart) -> Style {
    match part {
        TablePart::Title | TablePart::Footer => Style::new().bold(),
        TablePart::Dir => Style::new().blue().bold(),
        TablePart::Value => Style::new().cyan(),
        TablePart::File => Style::new(),
        TablePart::Separator => Style::new().dim(),
    }
}

/// Render the outline table with terminal styles
pub fn render_table(table: &OutlineTable) -> String {
    table.render_with(|part, text| style_for(part).apply_to(text).to_string())
}

/// Render tree and outline as pretty-printed JSON
pub fn render_json(tree: &StatsTree, outline: &Outline) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(&JsonReport { tree, outline })?;
    json.push('\n');
    Ok(json)
}
