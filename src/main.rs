//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Load and validate the content of a front-matter based site", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List pages, tags or categories
    #[command(alias = "ls")]
    List {
        /// Type of content to list (pages, tags, categories)
        #[arg(default_value = "pages")]
        r#type: String,

        /// Include draft pages
        #[arg(long)]
        drafts: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a single page
    Show {
        /// Path relative to the content directory
        path: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Validate every content file, drafts included
    Check,

    /// Create a new page
    New {
        /// Title of the new page
        title: String,

        /// Section (directory under the content directory)
        #[arg(short, long)]
        section: Option<String>,

        /// Mark the page as a draft
        #[arg(long)]
        draft: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::List {
            r#type,
            drafts,
            json,
        } => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&folio, &r#type, drafts, json)?;
        }

        Commands::Show { path, json } => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::show::run(&folio, &path, json)?;
        }

        Commands::Check => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::check::run(&folio)?;
        }

        Commands::New {
            title,
            section,
            draft,
        } => {
            let folio = folio::Folio::new(&base_dir)?;
            tracing::info!("Creating new page with title: {}", title);
            let path = folio.new_page(&title, section.as_deref(), draft)?;
            println!("Created: {:?}", path);
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
