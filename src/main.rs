//! Thin CLI front-end: decompress a gzip file to stdout.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

/// Decompress a gzip file and write the result to stdout.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the gzip-compressed input file.
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let compressed = fs::read(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    let decoded = mini_gzip::decompress_gzip(&compressed)
        .with_context(|| format!("decompressing {}", args.path.display()))?;

    io::stdout()
        .write_all(&decoded)
        .context("writing decoded output to stdout")?;
    Ok(())
}
