// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use gantry::output::OutputMode;
use gantry::types::{Repository, Tag};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gantry")]
#[command(about = "Rolling container deploys between image tags")]
#[command(version)]
pub struct Cli {
    /// Container daemon endpoint: an http://, tcp:// or unix:// URL, or a socket path
    /// [default: http://localhost:4243] [env: GANTRY_BASE_URL]
    #[arg(short, long, global = true)]
    pub base_url: Option<String>,

    /// Path to a configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace containers running one tag with containers running another
    Deploy {
        /// Tag the running containers are on
        #[arg(short = 'f', long)]
        from_tag: Tag,

        /// Tag to start replacements from
        #[arg(short = 't', long)]
        to_tag: Tag,

        /// Repository both tags belong to
        repository: Repository,

        /// Print the deploy report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List IDs of running containers
    Containers {
        /// Only containers running this tag
        #[arg(short, long)]
        tag: Option<Tag>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Repository to inspect
        repository: Repository,
    },

    /// List published ports of running containers
    Ports {
        /// Only containers running this tag
        #[arg(short, long)]
        tag: Option<Tag>,

        /// Omit the header row
        #[arg(short, long, conflicts_with = "json")]
        quiet: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Repository to inspect
        repository: Repository,
    },
}

impl Commands {
    /// Output mode selected by this subcommand's flags.
    pub fn output_mode(&self) -> OutputMode {
        match self {
            Commands::Deploy { json, .. } | Commands::Containers { json, .. } => {
                OutputMode::from_flags(false, *json)
            }
            Commands::Ports { quiet, json, .. } => OutputMode::from_flags(*quiet, *json),
        }
    }
}
