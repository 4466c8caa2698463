use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use benchcsv::parse::normalize_line;
use benchcsv::pairing::{PairedRecords, TracingDiagnostics};
use benchcsv::report::write_csv;

#[derive(Debug, Parser)]
#[command(name = "benchcsv")]
#[command(about = "Convert ffmpeg -benchmark log output into CSV")]
#[command(version)]
struct Command {
    /// Benchmark log to read; stdin when not given
    #[arg(short, long)]
    benchmark_file: Option<PathBuf>,
    /// CSV file to write
    #[arg(short, long)]
    csv_file: PathBuf,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(opts: Command) -> Result<()> {
    let reader: Box<dyn BufRead> = match &opts.benchmark_file {
        Some(path) => {
            if !path.exists() {
                bail!("Benchmark file not found: {}", path.display());
            }
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let output = File::create(&opts.csv_file)
        .with_context(|| format!("Failed to create {}", opts.csv_file.display()))?;

    // Read errors end the line stream; the one that did it is stashed here
    // and surfaced after the rows read so far have been flushed.
    let mut read_error = None;
    let lines = reader
        .lines()
        .map_while(|result| match result {
            Ok(line) => Some(line),
            Err(err) => {
                read_error = Some(err);
                None
            }
        })
        .filter_map(|line| normalize_line(&line).map(str::to_string));

    let records = PairedRecords::new(lines, TracingDiagnostics);
    let rows = write_csv(records, BufWriter::new(output))?;

    if let Some(err) = read_error {
        return Err(err).context("Failed to read benchmark input");
    }

    tracing::info!("wrote {} rows to {}", rows, opts.csv_file.display());
    Ok(())
}

fn main() -> Result<()> {
    let opts = Command::parse();

    let default_filter = if opts.verbose {
        "benchcsv=debug"
    } else {
        "benchcsv=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(io::stderr)
        .init();

    run(opts)
}
