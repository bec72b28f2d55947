//! Compare two Anafora annotation files of the same text.
//!
//! Usage:
//!   anafora-iaa first.xml second.xml [--config iaa.toml] [--json]
//!
//! Logging follows `RUST_LOG`, e.g. `RUST_LOG=anafora=debug`.

use std::path::PathBuf;
use std::process::ExitCode;

use anafora_iaa::{format_report, IaaConfig, IaaReport, IaaResult};
use clap::Parser;
use tracing::error;

/// Inter-annotator agreement between two Anafora XML files
#[derive(Parser, Debug)]
#[command(name = "anafora-iaa")]
#[command(about = "Inter-annotator agreement between two Anafora XML files")]
struct Args {
    /// First annotation file
    left: PathBuf,

    /// Second annotation file
    right: PathBuf,

    /// TOML file with scope and entity type filters
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn run(args: &Args) -> IaaResult<String> {
    let config = match &args.config {
        Some(path) => IaaConfig::load(path)?,
        None => IaaConfig::standard(),
    };
    let report = IaaReport::compare_files(&args.left, &args.right, &config)?;
    if args.json {
        report.to_json()
    } else {
        Ok(format_report(&report))
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "agreement failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
