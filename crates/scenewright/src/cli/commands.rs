//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scenewright - co-author narrated video scripts with Gemini
#[derive(Parser, Debug)]
#[command(name = "scenewright")]
#[command(about = "Co-author narrated video scripts with a tool-calling Gemini assistant", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chat with the assistant about a script
    Chat {
        /// Script JSON file to load and save (created on first save)
        #[arg(long)]
        script: Option<PathBuf>,

        /// Anchor image attached to every turn (repeat, up to three)
        #[arg(long)]
        anchor: Vec<PathBuf>,
    },

    /// Translate every scene's narration in a script file
    Translate {
        /// Script JSON file
        #[arg(long)]
        script: PathBuf,

        /// Target language label, e.g. "French"
        #[arg(long)]
        language: String,

        /// Write the result here instead of overwriting the script
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the script context block the assistant would receive
    Context {
        /// Script JSON file
        #[arg(long)]
        script: PathBuf,
    },
}
