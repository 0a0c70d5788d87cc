use anyhow::{Context, Result};
use clap::Parser;

use rgstats::StatsConfig;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Frequency statistics for minimizer and RepeatMasker annotation files",
    long_about = None
)]
struct Cli {
    /// Name of the reference genome to analyze (e.g. dm3); expects
    /// <genome>.mins and <genome>/<genome>.fa.out in the current directory
    genome: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = StatsConfig::new(cli.genome);
    config
        .execute()
        .context("Failed to compute genome statistics")?;

    Ok(())
}
