use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediameta")]
#[command(author, version, about = "Inspect ffprobe JSON reports as labeled metadata")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display the metadata in an ffprobe JSON report
    Show {
        /// Report file, or `-` to read standard input
        #[arg(required = true)]
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Include format and stream tags
        #[arg(long)]
        tags: bool,
    },

    /// List the field keys of an entity
    Keys {
        /// Entity whose keys to list
        #[arg(value_enum)]
        entity: Entity,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Entity {
    Format,
    Stream,
    FormatTags,
    StreamTags,
}
