use clap::{Parser, Subcommand};
use logreport_cli::{OutputFormat, commands, config, exit_code};
use logreport_core::Settings;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::sync::atomic::AtomicBool;
use tracing::Level;

#[derive(Parser)]
#[command(name = "logreport")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Build latency reports from nginx UI access logs",
    long_about = "logreport finds the most recent nginx-access-ui.log-YYYYMMDD[.gz] file, \
                  aggregates request times per URL and renders report-YYYY.MM.DD.html \
                  from an HTML template."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a KEY = value configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the HTML report for the latest log (default)
    Report,

    /// Print the slowest endpoints of the latest log without writing a report
    Top {
        /// Number of endpoints to show
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = config::load_settings(cli.config.as_deref());

    // Initialize logging
    init_logging(cli.verbose, settings.as_ref().ok());

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{:#}", e);
            return ExitCode::from(logreport_cli::EXIT_FAILURE);
        }
    };

    match &cli.config {
        Some(path) => tracing::info!("Using config: {}", path.display()),
        None => tracing::info!("Using default config"),
    }

    let interrupt = Arc::new(AtomicBool::new(false));
    let registered =
        signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&interrupt));
    if let Err(e) = registered {
        tracing::warn!("Failed to install Ctrl+C handler: {}", e);
    }

    // Execute the command
    let result = match cli.command.unwrap_or(Commands::Report) {
        Commands::Report => commands::report::execute(&settings, &interrupt).map(|_| ()),
        Commands::Top { limit, format } => {
            commands::top::execute(&settings, &interrupt, limit, format)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

fn init_logging(verbose: bool, settings: Option<&Settings>) {
    use tracing_subscriber::EnvFilter;

    let level = match settings {
        _ if verbose => Level::DEBUG,
        Some(settings) => settings.logging_level,
        None => Level::INFO,
    };
    let directive = level.to_string().to_ascii_lowercase();
    let filter = EnvFilter::new(format!(
        "logreport={0},logreport_cli={0},logreport_core={0}",
        directive
    ));

    let log_file = settings.and_then(|s| s.logging_file.as_ref()).map(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| (path, e))
    });

    match log_file {
        Some(Ok(file)) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        other => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr)
                .init();

            if let Some(Err((path, e))) = other {
                tracing::warn!(
                    "Failed to open log file {}, logging to stderr: {}",
                    path.display(),
                    e
                );
            }
        }
    }
}
