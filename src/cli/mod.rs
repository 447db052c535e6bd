//! CLI module for Explain This.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::config::ComplexityLevel;
use clap::{Parser, Subcommand};

/// Explain This - difficulty-leveled explanations of PDFs, videos, and text
///
/// Runs the HTTP API, or explains a single source straight from the terminal.
#[derive(Parser, Debug)]
#[command(name = "explain-this")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to HOST or the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to PORT or the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Explain a piece of text
    Text {
        /// The text to explain
        text: String,

        /// Complexity level (child, student, expert)
        #[arg(short, long, default_value = "student")]
        level: ComplexityLevel,
    },

    /// Explain the contents of a local PDF file
    Pdf {
        /// Path to the PDF
        path: String,

        /// Complexity level (child, student, expert)
        #[arg(short, long, default_value = "student")]
        level: ComplexityLevel,
    },

    /// Explain a YouTube video from its transcript
    Youtube {
        /// YouTube video URL
        url: String,

        /// Complexity level (child, student, expert)
        #[arg(short, long, default_value = "student")]
        level: ComplexityLevel,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration (file plus environment)
    Show,

    /// Write a default configuration file (at --config if given)
    Init,

    /// Show the configuration file path in use
    Path,
}
