//! CLI command definitions and dispatch for the `podcraft` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a
//! verb-first pattern (e.g., `podcraft new`, `podcraft chat <id>`).

pub mod chat;
pub mod podcast;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Create podcasts by having a conversation with an AI host.
#[derive(Parser)]
#[command(name = "podcraft", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new podcast episode draft.
    New {
        /// Episode topic.
        #[arg(long)]
        title: Option<String>,

        /// Optional episode notes shown to the host.
        #[arg(long)]
        description: Option<String>,

        /// Host persona id (see `podcraft hosts`).
        #[arg(long)]
        host: Option<String>,
    },

    /// List all podcast episodes.
    #[command(alias = "ls")]
    List,

    /// List the available host personas.
    Hosts,

    /// Start (or resume) the conversation for an episode.
    Chat {
        /// Podcast id.
        id: String,
    },

    /// Export an episode transcript as text.
    Export {
        /// Podcast id.
        id: String,
    },

    /// Delete an episode and its conversation history.
    #[command(alias = "rm")]
    Delete {
        /// Podcast id.
        id: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Publish a finished episode.
    Publish {
        /// Podcast id.
        id: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
