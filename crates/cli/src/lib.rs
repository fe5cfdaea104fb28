use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Config file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "decayviz.yaml";

#[derive(Parser, Debug)]
#[command(name = "decayviz")]
#[command(about = "DecayViz - decay-chain diagrams and decay evolution charts over HTTP")]
#[command(version)]
pub struct Cli {
    /// Log output format (overrides `logging.format`)
    #[arg(long, value_enum, global = true, env = "DECAYVIZ_LOG_FORMAT")]
    pub log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API
    Start {
        /// Path to the configuration file; built-in defaults when absent
        #[arg(short, long, env = "DECAYVIZ_CONFIG")]
        config: Option<PathBuf>,

        /// Override `service.host`
        #[arg(long)]
        host: Option<String>,

        /// Override `service.port`
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate configuration without starting the server
    Validate {
        /// Path to the configuration file
        #[arg(short, long, env = "DECAYVIZ_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Write a configuration file with every default filled in
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        output: PathBuf,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Render one decay-chain diagram to a PNG file
    Chain {
        /// Root nuclide, e.g. `U-238` or `99mTc`
        #[arg(short, long)]
        isotope: String,

        /// PNG file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Configuration for figure size, dpi and fonts
        #[arg(short, long, env = "DECAYVIZ_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormatArg {
    /// Human-readable, colored
    Pretty,
    /// One JSON object per line
    Json,
    Compact,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_start_overrides() {
        let cli = Cli::try_parse_from([
            "decayviz",
            "start",
            "--config",
            "conf/decayviz.yaml",
            "--host",
            "127.0.0.1",
            "-p",
            "8100",
        ])
        .unwrap();

        match cli.command {
            Commands::Start { config, host, port } => {
                assert_eq!(config, Some(PathBuf::from("conf/decayviz.yaml")));
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(8100));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_chain_requires_isotope_and_output() {
        assert!(Cli::try_parse_from(["decayviz", "chain", "--isotope", "U-238"]).is_err());

        let cli = Cli::try_parse_from([
            "decayviz",
            "--log-format",
            "json",
            "chain",
            "-i",
            "U-238",
            "-o",
            "u238.png",
        ])
        .unwrap();
        assert_eq!(cli.log_format, Some(LogFormatArg::Json));
        match cli.command {
            Commands::Chain {
                isotope, output, ..
            } => {
                assert_eq!(isotope, "U-238");
                assert_eq!(output, PathBuf::from("u238.png"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_init_defaults() {
        let cli = Cli::try_parse_from(["decayviz", "init"]).unwrap();
        match cli.command {
            Commands::Init { output, force } => {
                assert_eq!(output, PathBuf::from(DEFAULT_CONFIG_PATH));
                assert!(!force);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_log_format() {
        assert!(Cli::try_parse_from(["decayviz", "--log-format", "xml", "init"]).is_err());
    }
}
