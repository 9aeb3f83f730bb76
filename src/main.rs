//! Command-line front end for the OMF51 to `.pat` converter.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use omf2pat::{convert_library, Options};

/// Convert OMF51 object libraries into FLIRT .pat signature files.
///
/// Handles the Keil C51 wide-index record variant transparently.
#[derive(Debug, Parser)]
#[command(name = "omf2pat", version, about)]
struct Args {
    /// Input library; `.lib` is assumed when no extension is given
    input: PathBuf,

    /// Skip modules with less code than this many bytes (floor 6)
    #[arg(short = 'c', long = "min-code", default_value_t = 6)]
    min_code: usize,

    /// Dump every decoded record to the console
    #[arg(short, long)]
    debug: bool,

    /// Output path; defaults to the input name with a `.pat` extension
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug {
        "omf2pat=debug"
    } else {
        "omf2pat=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let input_path = input_path(&args.input);
    let output_path = args
        .output
        .unwrap_or_else(|| input_path.with_extension("pat"));

    let input = File::open(&input_path)
        .with_context(|| format!("cannot open {}", input_path.display()))?;
    let output = File::create(&output_path)
        .with_context(|| format!("cannot create {}", output_path.display()))?;

    let options = Options::new(args.min_code);
    let stats = convert_library(BufReader::new(input), BufWriter::new(output), &options)
        .with_context(|| format!("while converting {}", input_path.display()))?;

    println!(
        "{} modules read, {} patterns written to {}",
        stats.modules,
        stats.patterns,
        output_path.display()
    );
    Ok(())
}

fn input_path(input: &Path) -> PathBuf {
    if input.extension().is_none() {
        input.with_extension("lib")
    } else {
        input.to_path_buf()
    }
}
