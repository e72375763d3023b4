//! CLI argument definitions for Pristup.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use clap::{Parser, Subcommand};

/// Pristup -- accessibility intent resolution for chat interfaces.
#[derive(Parser)]
#[command(
    name = "pristup",
    version,
    about = "Pristup -- accessibility intent resolution",
    long_about = "Decides whether a chat message asks to change an accessibility setting \
                  (font size, font type, color theme) and applies it, or forwards the \
                  message to ordinary conversation."
)]
pub struct Cli {
    /// Path to the settings file.
    #[arg(long, global = true, default_value = "config/default.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive prompt that resolves and applies each line.
    Run,

    /// Resolve a single message and print the decision as JSON.
    Classify {
        /// The message to classify.
        text: String,
    },

    /// Start the HTTP API.
    Serve {
        /// Address to bind the HTTP server to (overrides the settings file).
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (overrides the settings file).
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Create the remote accessibility assistant and print its id.
    InitAssistant {
        /// Display name of the assistant.
        #[arg(long, default_value = pristup_assistant::DEFAULT_ASSISTANT_NAME)]
        name: String,

        /// Model to use (defaults to OPENAI_MODEL or the built-in default).
        #[arg(long)]
        model: Option<String>,
    },

    /// Show configuration readiness.
    Status,
}
