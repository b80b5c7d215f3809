use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use daily_tracker::cli::{self, Cli, Commands, Context};
use daily_tracker::config::AppConfig;
use daily_tracker::db::Database;
use daily_tracker::services::Tracker;

/// Initialize tracing: stderr plus a plain-text log file.
///
/// The returned guard flushes the file writer on drop and must outlive the run.
fn init_tracing(config: &AppConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "daily_tracker=info,dtrack=info".into()),
    );

    let dir = config
        .log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = config
        .log_file_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("taskmanager.log");

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir);

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            tracing::warn!(error = %e, path = %config.log_file_path.display(), "Log file unavailable");
            None
        }
    }
}

async fn run(command: Commands, config: AppConfig) -> anyhow::Result<()> {
    let db = Database::open(config.database_path.clone())?;
    db.migrate()?;

    let ctx = Context {
        tracker: Tracker::new(db),
        config,
    };
    cli::run(command, &ctx).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load_with(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _guard = init_tracing(&config);

    let command = cli.command.name();
    tracing::info!(command, "Starting command");

    match run(cli.command, config).await {
        Ok(()) => {
            tracing::info!(command, "Command completed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(command, error = %format!("{:#}", e), "Command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
