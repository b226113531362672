use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "riskmap")]
#[command(about = "Python structure, complexity and test-risk analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse every Python file under a directory and compute its metrics
    Analyze {
        /// Directory to analyze
        #[arg(long, default_value = ".")]
        path: PathBuf,

        /// Output file for the analysis JSON (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Configuration file (defaults to .riskmap.toml in the analyzed directory)
        #[arg(short, long, env = "RISKMAP_CONFIG")]
        config: Option<PathBuf>,

        /// Analyze files one at a time
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Number of worker threads (0 = all cores)
        #[arg(short = 'j', long = "jobs", default_value = "0")]
        jobs: usize,
    },

    /// Score every function of a saved analysis
    Risks {
        /// Analysis JSON written by `riskmap analyze`
        #[arg(long, default_value = "analysis.json")]
        analysis: PathBuf,

        /// Output file for the risk map JSON (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Configuration file for weights and thresholds
        #[arg(short, long, env = "RISKMAP_CONFIG")]
        config: Option<PathBuf>,
    },

    /// List the functions most in need of tests
    Targets {
        /// Analysis JSON written by `riskmap analyze`
        #[arg(long, default_value = "analysis.json")]
        analysis: PathBuf,

        /// Risk map JSON written by `riskmap risks`
        #[arg(long, default_value = "risk_map.json")]
        risks: PathBuf,

        /// Minimum risk score (defaults to thresholds.target_risk)
        #[arg(long)]
        threshold: Option<f64>,

        /// Print the generator prompt context instead of JSON
        #[arg(long)]
        context: bool,

        /// Configuration file
        #[arg(short, long, env = "RISKMAP_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Write a default .riskmap.toml to the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

/// Log level for a `-v` count: warn, then info, then debug.
pub fn log_level(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}
