//! CLI argument definitions.

pub mod records;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Workflow gateway for Wazzup webhooks, Directus records, and websocket
/// peers.
#[derive(Parser)]
#[command(name = "flowgate", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding config.toml (default: ~/.flowgate)
    #[arg(long, global = true, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Emit raw JSON instead of styled output
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the gateway server and register the webhook subscription
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Do not touch the remote subscription on startup/shutdown
        #[arg(long)]
        no_register: bool,
    },

    /// Operate on Directus collection records and files
    Records {
        #[command(subcommand)]
        command: RecordsCommand,
    },
}

#[derive(Subcommand)]
pub enum RecordsCommand {
    /// Create a record in a collection
    Create {
        collection: String,
        /// Record data as a JSON object
        #[arg(long)]
        data: String,
    },

    /// Update a record
    Update {
        collection: String,
        record_id: String,
        /// Fields to change, as a JSON object
        #[arg(long)]
        data: String,
    },

    /// Delete a record
    Delete {
        collection: String,
        record_id: String,
    },

    /// Fetch a single record
    FindOne {
        collection: String,
        record_id: String,
    },

    /// Query records in a collection
    FindMany {
        collection: String,
        /// Directus filter rules object (JSON)
        #[arg(long)]
        filter: Option<String>,
        /// Comma-separated field list, wildcards allowed
        #[arg(long)]
        fields: Option<String>,
    },

    /// Upload a file to the files endpoint
    Upload {
        /// Path of the file to upload
        path: PathBuf,

        /// Name to give the uploaded file (default: the file's own name)
        #[arg(long)]
        file_name: Option<String>,

        /// MIME type (default: application/octet-stream)
        #[arg(long)]
        content_type: Option<String>,

        /// Target folder UUID
        #[arg(long)]
        folder: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
}
