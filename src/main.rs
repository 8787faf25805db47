use anyhow::{anyhow, Result};
use clap::Parser;
use portafolio::app::App;
use portafolio::cli::{Cli, CliHandler, Commands, LogDestination};
use portafolio::config::PageFile;
use portafolio::images::ImageManager;
use portafolio::theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle CLI commands before touching the terminal
    if let Some(Commands::Check) = cli.command {
        return CliHandler::handle_check(cli.page.as_deref());
    }

    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Logs go to a file only when asked for, so they never interfere with
    // the TUI; `--debug` alone reports on stderr for runs outside a TTY.
    match cli.log_destination() {
        LogDestination::File(path) => {
            let log_file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|err| {
                    anyhow!("failed to open log file {}: {}", path.display(), err)
                })?;
            tracing_subscriber::fmt()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false) // Disable ANSI colors in log file
                .with_max_level(log_level)
                .init();
        }
        LogDestination::Stderr => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_max_level(log_level)
                .init();
        }
        LogDestination::None => {}
    }

    if cli.debug {
        tracing::info!("🐛 Debug mode enabled - verbose logging active");
    }

    let theme = match cli.theme.as_deref() {
        Some(name) => Theme::by_name(name).ok_or_else(|| {
            anyhow!(
                "unknown theme '{}' (available: {})",
                name,
                Theme::available_names().join(", ")
            )
        })?,
        None => Theme::default(),
    };

    let (file, source) = PageFile::load(cli.page.as_deref())?;
    tracing::info!("Loading page from {}", source);

    let mut app = App::new(file, source, theme, ImageManager::new());
    app.run().await
}
