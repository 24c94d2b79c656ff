use anyhow::Result;
use biomarker_risk::cli::{Cli, Commands};
use biomarker_risk::commands::{self, ScoreConfig};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.verbosity());

    match cli.command {
        Commands::Score {
            readings,
            config,
            format,
            output,
            label,
            plain,
            verbosity: _,
        } => commands::handle_score(ScoreConfig {
            readings,
            config,
            format,
            output,
            label,
            plain,
        }),
        Commands::Init { force } => commands::init_config(force),
        Commands::Catalog { format } => commands::show_catalog(format),
    }
}

// -v raises the default filter; BIOMARKER_RISK_LOG overrides it
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("BIOMARKER_RISK_LOG")
        .format_timestamp(None)
        .init();
}
