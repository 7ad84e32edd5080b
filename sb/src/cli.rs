//! CLI argument parsing for sharebridge

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sb")]
#[command(author, version, about = "Deliver share-text events to a consumer runtime", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a JSON-lines replay script against a bridge, printing pushes
    Replay {
        /// Script file, one step per line
        #[arg(required = true)]
        script: PathBuf,
    },

    /// Parse shared text as a timestamped YouTube link
    Parse {
        /// The shared text
        #[arg(required = true)]
        text: String,
    },
}
