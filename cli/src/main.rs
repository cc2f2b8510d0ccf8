use clap::Parser;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::Commands;
use config::{AppConfig, LOG_FILE};

#[derive(Parser, PartialEq, Debug)]
#[command(name = "constkeeper")]
#[command(about = "Manage environment-scoped constants from the terminal", long_about = None)]
struct Cli {
    /// Path to the config file (defaults to ~/.constkeeper/config.toml)
    #[arg(long = "config", global = true)]
    config_path: Option<PathBuf>,

    /// Enable debug output, written to ~/.constkeeper/logs/constkeeper.log
    #[arg(long = "debug", default_value_t = false, global = true)]
    debug: bool,

    /// Environment to work in, by id or name
    #[arg(
        short = 'e',
        long = "env",
        env = "CONSTKEEPER_ENVIRONMENT",
        global = true
    )]
    environment: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Log to a file; the terminal belongs to the form while it is open.
fn init_logging(debug: bool) -> Option<WorkerGuard> {
    if !debug {
        return None;
    }

    let appender = match RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(AppConfig::log_dir())
    {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to open log file: {}", e);
            return None;
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("error,{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.debug);

    let config = match AppConfig::load(cli.config_path.as_ref()) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config.config_path.display());
            config
        }
        Err(e) => {
            eprintln!("Failed to load config file: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = cli.command.run(config, cli.environment).await {
        eprintln!("Ops! something went wrong: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap_or_else(|e| panic!("parse failed: {}", e))
    }

    #[test_case(&["constkeeper", "add"], Commands::Add ; "add")]
    #[test_case(&["constkeeper", "edit", "API_KEY"], Commands::Edit { name: "API_KEY".into() } ; "edit")]
    #[test_case(&["constkeeper", "ls"], Commands::List ; "list alias")]
    #[test_case(&["constkeeper", "rm", "API_KEY"], Commands::Delete { name: "API_KEY".into() } ; "delete alias")]
    #[test_case(&["constkeeper", "environments"], Commands::Environments ; "environments")]
    fn subcommands(args: &[&str], expected: Commands) {
        assert_eq!(parse(args).command, expected);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&[
            "constkeeper",
            "add",
            "--env",
            "staging",
            "--debug",
            "--config",
            "/tmp/c.toml",
        ]);
        assert_eq!(cli.environment.as_deref(), Some("staging"));
        assert!(cli.debug);
        assert_eq!(cli.config_path, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn edit_requires_a_name() {
        assert!(Cli::try_parse_from(["constkeeper", "edit"]).is_err());
    }
}
