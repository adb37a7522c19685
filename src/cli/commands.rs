use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "notekeep")]
#[command(version, about = "Turn loose text files into a structured note collection")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Collection file (defaults to $NOTEKEEP_FILE or ./notes.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Explicit log level or filter (e.g. "warn", "notekeep=trace")
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify, structure and append every text file under a directory
    Ingest(IngestArgs),

    /// Add a note directly, without calling the model
    Add {
        /// Note text
        text: Option<String>,

        /// Note title (derived from the text when omitted)
        #[arg(long)]
        title: Option<String>,

        /// Note status (open, closed)
        #[arg(long)]
        status: Option<String>,

        /// Note priority (low, medium, high)
        #[arg(long)]
        priority: Option<String>,

        /// Mark the note as private
        #[arg(long)]
        private: bool,

        /// Read the text from stdin
        #[arg(long, conflicts_with = "text")]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List notes
    List {
        /// Only show notes with this status
        #[arg(long)]
        status: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get a single note by ID
    Get {
        /// Note ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug)]
pub struct IngestArgs {
    /// Directory to scan for source files
    pub root: PathBuf,

    /// Source file extension (can be specified multiple times; default: txt)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Model name (overrides $NOTEKEEP_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// API base URL (overrides $NOTEKEEP_API_BASE)
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Total attempts per model call
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Delay between attempts, in milliseconds
    #[arg(long, value_name = "MS")]
    pub retry_delay_ms: Option<u64>,

    /// Pause after each file, in milliseconds
    #[arg(long, value_name = "MS")]
    pub pace_ms: Option<u64>,

    /// Run the pipeline but do not write the collection
    #[arg(long)]
    pub dry_run: bool,
}
