//! PDF watermark remover CLI
//!
//! Removes the Master PDF Editor demo watermark from every page of a PDF.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use pdf_no_wm::pdf::{remove_watermarks, UnmarkOptions, UnmarkReport};

/// Exit code for invalid command-line usage
const USAGE_EXIT_CODE: i32 = 255;

/// Remove Master PDF Editor watermark from PDF
#[derive(Parser)]
#[command(name = "pdf-no-wm")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Write a clean copy
    pdf-no-wm input.pdf output.pdf

    # Clean a file in place
    pdf-no-wm report.pdf report.pdf

    # Show which pages carry the watermark without writing anything
    pdf-no-wm --dry-run input.pdf output.pdf")]
struct Cli {
    /// Input PDF file
    input: PathBuf,

    /// Output PDF file path (may be the same as the input)
    output: PathBuf,

    /// Report watermarked pages without writing the output
    #[arg(long)]
    dry_run: bool,

    /// Show debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not usage errors
            let code = if e.use_stderr() { USAGE_EXIT_CODE } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    // RUST_LOG overrides the flags
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pdf_no_wm={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    if !cli.quiet {
        println!("Reading {}...", cli.input.display());
    }

    let options = UnmarkOptions {
        dry_run: cli.dry_run,
        ..UnmarkOptions::new(&cli.input, &cli.output)
    };
    let report = remove_watermarks(&options)
        .with_context(|| format!("failed to process {}", cli.input.display()))?;

    if !cli.quiet {
        print_report(&report, cli.dry_run);
        if cli.dry_run {
            println!(
                "Dry run: {} of {} pages carry the watermark",
                report.pages_cleaned(),
                report.pages.len()
            );
        } else {
            println!("Wrote output {:?}", cli.output.display().to_string());
        }
    }

    Ok(())
}

fn print_report(report: &UnmarkReport, dry_run: bool) {
    for page in &report.pages {
        if page.found() && dry_run {
            println!("Found watermark in page {}", page.page_number);
        } else if page.found() {
            println!("Removed watermark from page {}", page.page_number);
        } else {
            println!("No watermark found in page {}", page.page_number);
        }
    }
}
