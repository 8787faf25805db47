use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::PageFile;

/// Portafolio - portfolio pages for the terminal
#[derive(Parser)]
#[command(name = "portafolio")]
#[command(about = "A portfolio page viewer for the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Page definition (TOML) to show instead of the default locations
    #[arg(long, global = true)]
    pub page: Option<PathBuf>,

    /// Color theme: dark, light or high-contrast
    #[arg(long)]
    pub theme: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a page definition without starting the UI
    Check,
}

/// Where log output goes for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Append to the given file.
    File(PathBuf),
    /// Print to stderr, for runs outside the TUI.
    Stderr,
    /// Drop everything.
    None,
}

impl Cli {
    /// An explicit log file always wins; `--debug` alone reports on
    /// stderr; a plain run writes no log anywhere.
    pub fn log_destination(&self) -> LogDestination {
        match (&self.log_file, self.debug) {
            (Some(path), _) => LogDestination::File(path.clone()),
            (None, true) => LogDestination::Stderr,
            (None, false) => LogDestination::None,
        }
    }
}

/// Command-line interface handler for everything that runs outside the UI.
pub struct CliHandler;

impl CliHandler {
    /// Load, validate and lint a page definition, and report what it holds.
    /// Exits nonzero when the page cannot be shown at all.
    pub fn handle_check(page: Option<&Path>) -> Result<()> {
        println!("🔍 Portafolio Page Check");
        println!("========================\n");

        let (file, source) = match PageFile::load(page) {
            Ok(loaded) => loaded,
            Err(e) => {
                println!("❌ Failed to load page: {e:#}");
                std::process::exit(1);
            }
        };
        println!("📄 Source: {source}");

        match file.validate() {
            Ok(()) => println!("✅ Page definition is valid"),
            Err(e) => {
                println!("❌ Invalid page: {e}");
                std::process::exit(1);
            }
        }

        let warnings = file.lint();
        for warning in &warnings {
            println!("⚠️  {warning}");
        }

        let cards: usize = file.sections.iter().map(|s| s.cards.len()).sum();
        let images: usize = file.sections.iter().map(|s| s.images.len()).sum();
        println!("\n📊 Page Summary");
        println!("===============");
        println!("   Name:     {}", file.profile.name);
        println!("   Sections: {}", file.sections.len());
        println!("   Cards:    {cards}");
        println!("   Images:   {images}");
        println!(
            "   Contact:  {}",
            file.contact
                .as_ref()
                .map(|c| c.recipient.as_str())
                .unwrap_or("(none)")
        );

        if warnings.is_empty() {
            println!("\n✅ No issues found");
        } else {
            println!("\n⚠️  {} warning(s) - see above", warnings.len());
        }

        Ok(())
    }
}
