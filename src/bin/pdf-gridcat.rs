//! PDF Grid CLI tool
//!
//! A command-line tool for arranging single-page PDFs into a grid.

use anyhow::Context;
use clap::Parser;
use glob::glob;
use std::path::PathBuf;
use std::process;

use pdf_gridcat::layout::{CellSizing, GridSpec, Layout};
use pdf_gridcat::pdf::{arrange_pdfs, plan_layout, GridOptions};
use pdf_gridcat::Error;

/// PDF Grid - Arrange multiple PDF pages horizontally and vertically on each page
#[derive(Parser)]
#[command(name = "pdf-gridcat")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Nine cards per sheet, three across
    pdf-gridcat -c 3 -r 3 -o sheet.pdf -i card-*.pdf

    # Two pages side by side
    pdf-gridcat -c 2 -o spread.pdf -i left.pdf right.pdf

    # Line columns up when pages differ in size
    pdf-gridcat -c 4 -r 2 --uniform -o contact.pdf -i \"scans/*.pdf\"

    # Show where every page would go without writing anything
    pdf-gridcat -c 2 -r 2 --dry-run -i a.pdf b.pdf c.pdf")]
struct Cli {
    /// Input PDF files (in order). Supports glob patterns like "*.pdf"
    #[arg(short, long = "input", required = true, num_args = 1..)]
    inputs: Vec<String>,

    /// Output PDF file path
    #[arg(short, long, required_unless_present = "dry_run")]
    output: Option<PathBuf>,

    /// Number of columns per page
    #[arg(short, long, default_value_t = 1)]
    columns: usize,

    /// Number of rows per page
    #[arg(short, long, default_value_t = 1)]
    rows: usize,

    /// Size cells by the widest page in each column and the tallest in each row
    #[arg(long)]
    uniform: bool,

    /// Print the placement of every input instead of writing a PDF
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Grid is validated before any file is touched
    let grid = GridSpec::new(cli.columns, cli.rows)?;
    let sizing = if cli.uniform {
        CellSizing::Uniform
    } else {
        CellSizing::Native
    };

    let input_paths = expand_globs(&cli.inputs)?;

    let options = GridOptions {
        input_paths,
        output_path: cli.output.unwrap_or_default(),
        grid,
        sizing,
    };

    if cli.dry_run {
        let layout = plan_layout(&options)?;
        print_layout(&options, &layout);
        return Ok(());
    }

    eprintln!(
        "Arranging {} PDF files into {} x {} grid...",
        options.input_paths.len(),
        grid.columns(),
        grid.rows()
    );

    let summary = arrange_pdfs(&options)
        .with_context(|| format!("failed to create {}", options.output_path.display()))?;

    eprintln!(
        "Wrote {} page(s) to: {}",
        summary.page_count,
        options.output_path.display()
    );

    Ok(())
}

/// Expand glob patterns in input paths
///
/// Matches of a single pattern are sorted; the order of the arguments
/// themselves is kept, since it decides where each page lands.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>, Error> {
    let mut paths = Vec::new();

    for pattern in patterns {
        // Check if pattern contains glob characters
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let entries = glob(pattern).map_err(|e| Error::InvalidGlob(format!("{}: {}", pattern, e)))?;

            let mut matched: Vec<PathBuf> = Vec::new();
            for entry in entries {
                match entry {
                    Ok(path) => matched.push(path),
                    Err(e) => log::warn!("glob error for {}: {}", pattern, e),
                }
            }
            if matched.is_empty() {
                return Err(Error::NoFilesMatched(pattern.clone()));
            }

            matched.sort();
            paths.extend(matched);
        } else {
            // No glob characters, treat as literal path
            paths.push(PathBuf::from(pattern));
        }
    }

    Ok(paths)
}

/// Print the placement table: one tab-separated row per input
///
/// Columns: input page column row x y w h path
fn print_layout(options: &GridOptions, layout: &Layout) {
    println!("input\tpage\tcolumn\trow\tx\ty\tw\th\tpath");
    for placement in &layout.placements {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            placement.input_index,
            placement.page,
            placement.column,
            placement.row,
            placement.x,
            placement.y,
            placement.width,
            placement.height,
            options.input_paths[placement.input_index].display()
        );
    }
}
