//! Root CLI structure for wdb-tool

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wdb-tool")]
#[command(about = "Command-line tool for LEGO Island WORLD.WDB asset containers", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the decoded structure of a WDB file
    List {
        /// Path to the WDB file
        file: PathBuf,
    },

    /// Export all worlds to a directory tree of blobs, images and metadata
    Export {
        /// Path to the WDB file
        file: PathBuf,

        /// Output directory (a WDB/ subtree is created inside it)
        #[arg(short, long)]
        output: PathBuf,

        /// Abort when two entities map to the same output path instead of
        /// overwriting
        #[arg(long)]
        strict: bool,
    },

    /// Print the name of every world in the file
    WorldNames {
        /// Path to the WDB file
        file: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
