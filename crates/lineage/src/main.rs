//! lineage - Main entry point

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lineage_render::{ProvenanceRenderer, comment_column_for_width};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod input;

#[derive(Parser)]
#[command(name = "lineage")]
#[command(version)]
#[command(about = "Show where merged configuration values came from", long_about = None)]
struct Cli {
    /// Rendering configuration (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Never emit colors
    #[arg(long, global = true)]
    plain: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recorded paths grouped by the file that supplied them
    Tree {
        /// Provenance dump (YAML or JSON)
        #[arg(long)]
        provenance: PathBuf,

        /// Only show these paths
        #[arg(long)]
        only: Vec<String>,
    },

    /// Show the document next to its provenance tree
    SideBySide {
        /// Merged document (YAML or JSON)
        #[arg(long)]
        document: PathBuf,

        /// Provenance dump (YAML or JSON)
        #[arg(long)]
        provenance: PathBuf,

        /// Width of the document column
        #[arg(long, default_value_t = 80)]
        width: usize,
    },

    /// Show the document with provenance comments
    Inline {
        /// Merged document (YAML or JSON)
        #[arg(long)]
        document: PathBuf,

        /// Provenance dump (YAML or JSON)
        #[arg(long)]
        provenance: PathBuf,

        /// Label of the file being described
        #[arg(long)]
        describe: Option<String>,

        /// Column at which comments start (defaults to the terminal width minus 60)
        #[arg(long)]
        comment_column: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let stdout_is_terminal = std::io::stdout().is_terminal();
    let mut config = input::load_config(cli.config.as_deref())?;
    if cli.plain || !stdout_is_terminal {
        config.color = false;
    }
    if cli.config.is_none() && stdout_is_terminal {
        let width = crossterm::terminal::size().ok().map(|(w, _)| usize::from(w));
        config.comment_column = comment_column_for_width(width);
    }

    let output = match cli.command {
        Commands::Tree { provenance, only } => {
            let renderer = ProvenanceRenderer::new(config);
            commands::tree::execute(commands::tree::TreeArgs { provenance, only }, &renderer)?
        }
        Commands::SideBySide {
            document,
            provenance,
            width,
        } => {
            let renderer = ProvenanceRenderer::new(config);
            commands::side_by_side::execute(
                commands::side_by_side::SideBySideArgs {
                    document,
                    provenance,
                    width,
                },
                &renderer,
            )?
        }
        Commands::Inline {
            document,
            provenance,
            describe,
            comment_column,
        } => {
            if let Some(column) = comment_column {
                config.comment_column = column;
            }
            let renderer = ProvenanceRenderer::new(config);
            commands::inline::execute(
                commands::inline::InlineArgs {
                    document,
                    provenance,
                    describe,
                },
                &renderer,
            )?
        }
    };

    print!("{output}");
    Ok(())
}
