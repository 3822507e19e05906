mod cmd;
mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};
use cmd::config::ConfigSubcommand;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "intercom-socials",
    about = "Export Intercom users' social profiles to a spreadsheet, one column per network",
    version,
    propagate_version = true
)]
struct Cli {
    /// Intercom API access token
    #[arg(
        long = "api-token",
        short = 'T',
        global = true,
        env = "INTERCOM_API_TOKEN",
        hide_env_values = true
    )]
    api_token: Option<String>,

    /// Log verbosity
    #[arg(
        long,
        short = 'L',
        global = true,
        env = "INTERCOM_LOG_LEVEL",
        value_enum,
        default_value_t = LogLevel::Info
    )]
    log_level: LogLevel,

    /// API base URL (default: https://api.intercom.io)
    #[arg(long, global = true, env = "INTERCOM_API_URL")]
    api_url: Option<String>,

    /// YAML config file
    #[arg(long, short = 'c', global = true, env = "INTERCOM_SOCIALS_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(flatten)]
    export: ExportArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flags for the default export action.
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Spreadsheet to write (default: IntercomSocials.xlsx)
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Also write rows for users without any social profile
    #[arg(
        long,
        short = 'I',
        visible_alias = "ignore-empty",
        overrides_with = "no_include_empty"
    )]
    pub include_empty: bool,

    /// Skip users without any social profile, even if the config file says otherwise
    #[arg(long, overrides_with = "include_empty")]
    pub no_include_empty: bool,

    /// Users requested per page
    #[arg(long)]
    pub per_page: Option<u32>,
}

impl ExportArgs {
    /// `Some` when either include-empty flag was given; the last one wins.
    pub fn include_empty_override(&self) -> Option<bool> {
        if self.no_include_empty {
            Some(false)
        } else if self.include_empty {
            Some(true)
        } else {
            None
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the social networks found across all users, with user counts
    Networks {
        /// Users requested per page (overrides a top-level --per-page)
        #[arg(long)]
        per_page: Option<u32>,
    },

    /// Inspect and validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level: tracing::Level = cli.log_level.into();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    let global = cmd::GlobalArgs {
        api_token: cli.api_token,
        api_url: cli.api_url,
        config: cli.config,
    };

    let result = match cli.command {
        None => cmd::export::run(&global, &cli.export, cli.json),
        Some(Commands::Networks { per_page }) => {
            cmd::networks::run(&global, &cli.export, per_page, cli.json)
        }
        Some(Commands::Config { subcommand }) => {
            cmd::config::run(&global, &cli.export, subcommand, cli.json)
        }
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
