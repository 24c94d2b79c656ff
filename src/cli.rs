use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use crate::io::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "biomarker-risk")]
#[command(about = "Rule-based metabolic risk scoring for biomarker panels", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a readings file and print the risk report
    Score {
        /// Readings file (JSON, or TOML when the extension is .toml)
        readings: PathBuf,

        /// Configuration file (defaults to the nearest .biomarker-risk.toml)
        #[arg(short, long, env = "BIOMARKER_RISK_CONFIG")]
        config: Option<PathBuf>,

        /// Output format (defaults to the configured format, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Label stored on the screening (defaults to the readings file stem)
        #[arg(long)]
        label: Option<String>,

        /// Disable colored output
        #[arg(long)]
        plain: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// List supported biomarkers with units and reference ranges
    Catalog {
        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Score { verbosity, .. } => *verbosity,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_score_command() {
        let args = vec![
            "biomarker-risk",
            "score",
            "panel.json",
            "--format",
            "markdown",
            "-o",
            "report.md",
            "-vv",
        ];

        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Score {
                readings,
                format,
                output,
                verbosity,
                plain,
                ..
            } => {
                assert_eq!(readings, PathBuf::from("panel.json"));
                assert_eq!(format, Some(OutputFormat::Markdown));
                assert_eq!(output, Some(PathBuf::from("report.md")));
                assert_eq!(verbosity, 2);
                assert!(!plain);
            }
            _ => panic!("Expected Score command"),
        }
    }

    #[test]
    fn test_cli_parsing_init_command() {
        let cli = Cli::parse_from(vec!["biomarker-risk", "init", "--force"]);

        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_cli_parsing_catalog_defaults_to_terminal() {
        let cli = Cli::parse_from(vec!["biomarker-risk", "catalog"]);

        match cli.command {
            Commands::Catalog { format } => assert_eq!(format, OutputFormat::Terminal),
            _ => panic!("Expected Catalog command"),
        }
        assert_eq!(cli.command.verbosity(), 0);
    }

    #[test]
    fn test_score_requires_readings_path() {
        assert!(Cli::try_parse_from(vec!["biomarker-risk", "score"]).is_err());
    }
}
