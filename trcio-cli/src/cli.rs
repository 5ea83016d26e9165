use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "trcio",
    about = "Enrich trace file headers with survey geometry",
    version
)]
pub struct Cli {
    /// Input trace file
    pub input: PathBuf,

    /// Output trace file (written atomically on success)
    pub output: PathBuf,

    /// Geometry table (delimited, no header row)
    #[arg(long, short = 'g')]
    pub geometry: PathBuf,

    /// Enable verbose output
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long)]
    pub no_color: bool,
}
