//! Planner CLI tool
//!
//! Prints the lines of calendar files that mention today or the next few days.

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use planner::date::{local_today, parse_date_expression, resolve_date};
use planner::rules::{build_rule_sets, MAX_DAYS};
use planner::source::{default_calendar_path, expand_inputs, filter_files};

/// Planner - print calendar lines for today and the coming days
#[derive(Parser)]
#[command(name = "planner")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Recognized dates: \"4/26\", \"Apr 26\", \"26 April\" (case-insensitive).

EXAMPLES:
    # Today and tomorrow from ~/lib/calendar
    planner

    # The coming week from two files
    planner -n 7 work.txt home.txt

    # As if it were next Friday
    planner --date friday \"notes/*.cal\"")]
struct Cli {
    /// Number of days to print, starting with today
    #[arg(
        short = 'n',
        long,
        default_value_t = 2,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_DAYS))
    )]
    days: u32,

    /// Date to treat as today (e.g., "today", "friday", "friday+1", "2026-01-14")
    #[arg(short, long)]
    date: Option<String>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Calendar files (in order). Supports glob patterns like "*.cal".
    /// Defaults to ~/lib/calendar
    files: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    planner::logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // "now" is read exactly once per run
    let local = local_today();
    let today = match cli.date.as_deref() {
        Some(expr) => resolve_date(&parse_date_expression(expr)?, local)?,
        None => local,
    };
    info!(%today, days = cli.days, "reference date");

    let rules = build_rule_sets(today, cli.days as usize)?;

    let paths: Vec<PathBuf> = if cli.files.is_empty() {
        vec![default_calendar_path()?]
    } else {
        expand_inputs(&cli.files)?
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    filter_files(&paths, &rules, &mut out).context("failed to filter calendars")?;

    Ok(())
}
