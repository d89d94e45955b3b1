//! # flowcount
//!
//! A CLI tool for counting control-flow constructs and scoring code
//! complexity across a source tree.
//!
//! ## Overview
//!
//! flowcount is built on top of flowcountlib and provides a command-line
//! interface for the lexical complexity heuristic. It analyzes a single file
//! or a whole directory tree, ranks files by complexity, and can export the
//! aggregate as a VISX visualization document.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze the current directory
//! flowcount .
//!
//! # Analyze one file
//! flowcount src/app.js
//!
//! # Output as JSON
//! flowcount . --output json
//!
//! # Filter files with glob patterns
//! flowcount . --include "src/**/*.ts" --exclude "**/generated/**"
//!
//! # Only scan specific extensions
//! flowcount . --ext js,ts
//!
//! # Export a VISX report
//! flowcount . --export report.visx --title "Payments Service" --theme dark
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use console::Style;
use flowcountlib::{
    aggregate, render, scan_file, scan_path, FilterConfig, RenderOptions, ScanOptions, ScanResult,
    Theme,
};

#[derive(Debug, Parser)]
#[command(
    name = "flowcount",
    version,
    about = "Heuristic control-flow construct counter and complexity scorer"
)]
struct Cli {
    /// Path to analyze, a source file or a directory tree
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Include files matching glob pattern (can be repeated)
    #[arg(short, long)]
    include: Vec<String>,

    /// Exclude files matching glob pattern (can be repeated)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// File extensions to scan (comma-separated, defaults to C/JS families)
    #[arg(long, value_delimiter = ',')]
    ext: Vec<String>,

    /// Number of ranked files to show in the table
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Write a VISX report document to this path
    #[arg(long)]
    export: Option<PathBuf>,

    /// Report title (defaults to one derived from the path)
    #[arg(long)]
    title: Option<String>,

    /// Report canvas width
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Report canvas height
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Report theme (light or dark)
    #[arg(long, default_value = "light")]
    theme: Theme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Build the library filter from the CLI pattern arguments.
fn build_filter(cli: &Cli) -> anyhow::Result<FilterConfig> {
    let mut filter = FilterConfig::new();
    for pattern in &cli.include {
        filter = filter.include(pattern)?;
    }
    for pattern in &cli.exclude {
        filter = filter.exclude(pattern)?;
    }
    if !cli.ext.is_empty() {
        filter = filter.extensions(cli.ext.clone());
    }
    Ok(filter)
}

/// Truncate a label to fit within max_len characters.
///
/// Counts characters, not bytes, so multi-byte paths never split on a
/// non-boundary.
fn truncate_label(label: &str, max_len: usize) -> String {
    let count = label.chars().count();
    if count > max_len {
        let keep = max_len.saturating_sub(2);
        let tail: String = label.chars().skip(count - keep).collect();
        format!("..{}", tail)
    } else {
        label.to_string()
    }
}

/// Build the styled header row.
///
/// Each cell is padded to its column width before the style is applied, so
/// ANSI escape bytes never count toward the pad width.
fn header_row(style: &Style, name_width: usize, cell_width: usize) -> String {
    format!(
        "{}{}{}",
        style.apply_to(format!("{:<name_width$}", "File")),
        style.apply_to(format!("{:>cell_width$}", "Constructs")),
        style.apply_to(format!("{:>cell_width$}", "Complexity")),
    )
}

fn print_table(result: &ScanResult, top: usize) {
    let header = Style::new().bold();
    let dim = Style::new().dim();
    let name_width = 50;
    let cell_width = 12;

    let total = &result.project.total;

    println!("{}", header_row(&header, name_width, cell_width));
    println!("{}", "-".repeat(name_width + cell_width * 2));

    for unit in result.project.units.iter().take(top) {
        println!(
            "{:<name_width$}{:>cell_width$}{:>cell_width$.1}",
            truncate_label(&unit.label, name_width - 2),
            unit.counts.total,
            unit.complexity,
        );
    }
    let hidden = result.project.unit_count().saturating_sub(top);
    if hidden > 0 {
        println!("{}", dim.apply_to(format!("... and {} more", hidden)));
    }

    println!();
    println!(
        "Files analyzed:         {}",
        result.project.unit_count()
    );
    println!("Total constructs:       {}", total.total);
    println!("Complexity score:       {:.1}", total.complexity_score);
    println!(
        "Cyclomatic complexity:  {}",
        total.cyclomatic_complexity()
    );
    println!(
        "Maintainability index:  {:.1}",
        total.maintainability_index()
    );
}

fn print_json(result: &ScanResult) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

/// Default report title derived from the analyzed path.
fn default_title(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    if path.is_file() {
        format!("Analysis of {}", name)
    } else {
        format!("Project Analysis: {}", name)
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let result = if cli.path.is_file() {
        let unit = scan_file(&cli.path)?;
        ScanResult {
            project: aggregate(vec![unit]),
            failures: Vec::new(),
            cancelled: false,
        }
    } else {
        let options = ScanOptions::new().filter(build_filter(&cli)?);
        scan_path(&cli.path, options)?
    };

    let warn = Style::new().yellow();
    for failure in &result.failures {
        eprintln!(
            "{}",
            warn.apply_to(format!(
                "warning: skipped {}: {}",
                failure.path.display(),
                failure.message
            ))
        );
    }

    match cli.output {
        OutputFormat::Table => print_table(&result, cli.top),
        OutputFormat::Json => print_json(&result)?,
    }

    if let Some(export_path) = &cli.export {
        let options = RenderOptions::new()
            .title(
                cli.title
                    .clone()
                    .unwrap_or_else(|| default_title(&cli.path)),
            )
            .width(cli.width)
            .height(cli.height)
            .theme(cli.theme);
        let document = render(&result.project.total, &options)?;
        fs::write(export_path, document)?;
        println!("Report written to {}", export_path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
