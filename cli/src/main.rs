//! Scheduling replay CLI.
//!
//! Reads a burst trace from a file or stdin, replays it, and prints the
//! seven-line metrics report to stdout.
//!
//! # Usage
//!
//! ```text
//! sched-replay trace.txt
//! sched-replay < trace.txt
//! sched-replay --format json --log-level debug trace.txt
//! ```
//!
//! Diagnostics go to stderr. On any error nothing is printed to stdout and
//! the process exits with status 1.

use clap::{Parser, ValueEnum};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process;

use sched_replay_core_rs::{read_trace, replay, ReplayReport, Trace};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Report output format
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    /// Seven-line plain text report
    Text,
    /// Full report (including per-thread figures) as JSON
    Json,
}

/// Command-line arguments for the replay analyzer.
#[derive(Parser, Debug)]
#[command(
    name = "sched-replay",
    author,
    version,
    about = "Replay a CPU burst trace and report scheduling metrics"
)]
struct Args {
    /// Trace file to read; omit or pass `-` to read stdin
    input: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print one line per thread after the summary (text format only)
    #[arg(long, default_value_t = false)]
    per_thread: bool,

    /// Log filter for stderr diagnostics; RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Load the trace, replay it, and print the report.
///
/// The report is rendered in full before anything is written, so a failed
/// replay leaves stdout empty.
fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let trace = load_trace(args.input.as_deref())?;
    info!(
        instructions = trace.queue.len(),
        threads = trace.header.num_threads,
        "trace loaded"
    );

    let report = replay(trace)?;
    let output = render(&report, args)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(output.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn load_trace(path: Option<&str>) -> Result<Trace, Box<dyn Error>> {
    match path {
        None | Some("-") => Ok(read_trace(io::stdin().lock())?),
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("file open failed '{}': {}", path, e))?;
            Ok(read_trace(BufReader::new(file))?)
        }
    }
}

fn render(report: &ReplayReport, args: &Args) -> Result<String, Box<dyn Error>> {
    match args.format {
        OutputFormat::Json => Ok(format!("{}\n", report.to_json()?)),
        OutputFormat::Text => {
            let mut output = report.to_string();
            if args.per_thread {
                for line in report.thread_lines() {
                    output.push_str(&line);
                    output.push('\n');
                }
            }
            Ok(output)
        }
    }
}
