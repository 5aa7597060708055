//! # treeloc
//!
//! A CLI tool that scans a directory tree, buckets files by language and
//! shows what share of the whole every folder and file holds.
//!
//! ## Overview
//!
//! treeloc is built on top of treeloclib. It walks the tree once, counts
//! lines, non-empty lines and bytes per language bucket, then prints an
//! outline where each node shows its percentage of the root for the chosen
//! metric.
//!
//! ## Usage
//!
//! ```bash
//! # Share of lines of code in the current directory
//! treeloc .
//!
//! # Share of bytes, two levels deep, largest first
//! treeloc . --metric size --depth 2 --sort metric
//!
//! # Skip generated code and teach it about Rust
//! treeloc . --exclude "src/generated" --language Rust=.rs
//!
//! # Show the value and root total behind each percentage
//! treeloc . --show-counts
//!
//! # Output as JSON
//! treeloc . --output json
//! ```

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;
use treeloclib::{
    scan_path, FilterConfig, Language, LanguageTable, Metric, OrderBy, OrderDirection, Ordering,
    Outline, OutlineOptions, OutlineTable, ScanOptions,
};

use render::{render_json, render_table, OutputMode};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("treeloc")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Directory-tree line counter with per-language share of the whole")
        .arg(
            Arg::new("path")
                .help("Path to analyze (defaults to current directory)")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("."),
        )
        .arg(
            Arg::new("metric")
                .short('m')
                .long("metric")
                .value_parser(["size", "lines", "non-empty"])
                .default_value("lines")
                .help("Metric percentages are computed for"),
        )
        .arg(
            Arg::new("depth")
                .short('d')
                .long("depth")
                .value_parser(clap::value_parser!(usize))
                .help("Deepest level to expand (root is 0)"),
        )
        .arg(
            Arg::new("sort")
                .short('s')
                .long("sort")
                .value_parser(["scan", "name", "metric"])
                .default_value("scan")
                .help("Sibling ordering"),
        )
        .arg(
            Arg::new("reverse")
                .short('r')
                .long("reverse")
                .action(ArgAction::SetTrue)
                .help("Flip the name or metric ordering"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude paths matching glob pattern (relative to the root)"),
        )
        .arg(
            Arg::new("ignore")
                .long("ignore")
                .action(ArgAction::Append)
                .help("Also skip entries with this base name (can be specified multiple times)"),
        )
        .arg(
            Arg::new("ignore-ext")
                .long("ignore-ext")
                .action(ArgAction::Append)
                .help("Also skip files with this extension (can be specified multiple times)"),
        )
        .arg(
            Arg::new("language")
                .short('l')
                .long("language")
                .action(ArgAction::Append)
                .help("Extra language bucket as NAME=.ext[,.ext] (can be specified multiple times)"),
        )
        .arg(
            Arg::new("max-file-size")
                .long("max-file-size")
                .value_parser(clap::value_parser!(u64))
                .help("Skip files larger than this many bytes"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(clap::builder::EnumValueParser::<OutputMode>::new())
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("show-counts")
                .long("show-counts")
                .action(ArgAction::SetTrue)
                .help("Follow each percentage with the value and root total it came from"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log skipped entries to stderr"),
        )
}

/// Install the stderr log subscriber
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("treeloc=debug,treeloclib=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn strings<'a>(matches: &'a ArgMatches, id: &str) -> Vec<&'a str> {
    matches
        .get_many::<String>(id)
        .map(|vals| vals.map(String::as_str).collect())
        .unwrap_or_default()
}

/// Build scan options from the command line
fn scan_options(matches: &ArgMatches) -> anyhow::Result<ScanOptions> {
    let mut filter = FilterConfig::new().exclude_many(&strings(matches, "exclude"))?;
    if let Some(bytes) = matches.get_one::<u64>("max-file-size") {
        filter = filter.max_file_size(*bytes);
    }
    for name in strings(matches, "ignore") {
        filter = filter.ignore_name(name);
    }
    for ext in strings(matches, "ignore-ext") {
        filter = filter.ignore_extension(ext);
    }

    let mut languages = LanguageTable::default();
    for spec in strings(matches, "language") {
        languages = languages.with_language(Language::parse(spec)?);
    }

    Ok(ScanOptions::new().filter(filter).languages(languages))
}

/// Build outline options from the command line
fn outline_options(matches: &ArgMatches) -> anyhow::Result<OutlineOptions> {
    let metric: Metric = parse_arg(matches, "metric")?;
    let mut ordering = match parse_arg::<OrderBy>(matches, "sort")? {
        OrderBy::Scan => Ordering::by_scan(),
        OrderBy::Name => Ordering::by_name(),
        OrderBy::Metric => Ordering::by_metric(),
    };
    if matches.get_flag("reverse") {
        ordering = match ordering.direction {
            OrderDirection::Ascending => ordering.descending(),
            OrderDirection::Descending => ordering.ascending(),
        };
    }

    let mut options = OutlineOptions::new().metric(metric).ordering(ordering);
    if let Some(depth) = matches.get_one::<usize>("depth") {
        options = options.max_depth(*depth);
    }
    Ok(options)
}

fn parse_arg<T>(matches: &ArgMatches, id: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr<Err = String> + Default,
{
    match matches.get_one::<String>(id) {
        Some(value) => value.parse().map_err(anyhow::Error::msg),
        None => Ok(T::default()),
    }
}

/// Scan the requested path and render the report
fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let path = matches
        .get_one::<PathBuf>("path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let mode = matches
        .get_one::<OutputMode>("output")
        .copied()
        .unwrap_or_default();

    let scan = scan_options(matches)?;
    let options = outline_options(matches)?;

    tracing::debug!(path = %path.display(), "scanning");
    let tree = scan_path(&path, &scan)?;
    let outline = Outline::build(&tree, &options)?;

    match mode {
        OutputMode::Table => {
            let table = if matches.get_flag("show-counts") {
                OutlineTable::with_counts(&outline)
            } else {
                OutlineTable::from_outline(&outline)
            };
            Ok(render_table(&table))
        }
        OutputMode::Json => render_json(&tree, &outline).context("failed to serialize report"),
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
