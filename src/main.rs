use anyhow::Result;
use clap::Parser;
use riskmap::cli::{log_level, Cli, Commands};
use riskmap::commands::{self, AnalyzeConfig, RisksConfig, TargetsConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG, when set, overrides the -v level.
    env_logger::Builder::new()
        .filter_level(log_level(cli.verbosity))
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Analyze {
            path,
            out,
            config,
            no_parallel,
            jobs,
        } => commands::handle_analyze(AnalyzeConfig {
            path,
            out,
            config,
            no_parallel,
            jobs,
        }),
        Commands::Risks {
            analysis,
            out,
            config,
        } => commands::handle_risks(RisksConfig {
            analysis,
            out,
            config,
        }),
        Commands::Targets {
            analysis,
            risks,
            threshold,
            context,
            config,
        } => commands::handle_targets(TargetsConfig {
            analysis,
            risks,
            threshold,
            context,
            config,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}
