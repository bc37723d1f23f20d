//! Command-line interface for solscope.

use std::path::PathBuf;

use clap::Parser;
use colored::*;

use crate::engine::build_default_engine;
use crate::parser::SourceFile;
use crate::report::CheckReport;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Detect which Solidity language features a source file uses.
///
/// Runs the default feature-checker bundle against one `.sol` file and
/// reports, for every detected feature, the sites where it occurs.
#[derive(Parser)]
#[command(name = "solscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Solidity source file to analyze
    pub path: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// List sites with their source snippets
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the analysis and print the result.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let code = std::fs::read_to_string(&cli.path)?;
    let filename = cli.path.to_string_lossy().to_string();

    let engine = build_default_engine();
    let report = engine.check_report(&SourceFile::new(filename.clone(), code))?;

    match cli.format.as_str() {
        "json" => println!("{}", report.to_json_string()?),
        "pretty" => print_pretty(&filename, &report, cli.verbose),
        other => anyhow::bail!("unsupported output format: {other:?} (expected pretty or json)"),
    }

    Ok(EXIT_SUCCESS)
}

fn print_pretty(filename: &str, report: &CheckReport, verbose: bool) {
    println!("{}", filename.bold());

    if report.is_empty() {
        println!("  no features detected");
        return;
    }

    for (name, sites) in report.iter() {
        println!("  {} {}", name.green().bold(), format!("({})", sites.len()).dimmed());
        if !verbose {
            continue;
        }
        for site in sites {
            let position = match (&site.location, site.index) {
                (Some(span), _) => format!("{}:{}", span.start.line, span.start.column + 1),
                (None, Some(index)) => format!("@{index}"),
                (None, None) => "<unlocated>".to_string(),
            };
            let snippet = site
                .literal
                .as_deref()
                .map(first_line)
                .unwrap_or_default();
            println!("    {} {}", position.cyan(), snippet.dimmed());
        }
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
