use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dropzone_app::LogTarget;
use dropzone_engine::DEFAULT_ENDPOINT;
use dropzone_logging::DEFAULT_LOG_FILE;

/// Upload a PDF to an analysis backend and render whatever it sends back.
#[derive(Debug, Parser)]
#[command(name = "dropzone", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Where to send log output
    #[arg(long, global = true, env = "DROPZONE_LOG", value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Log file used by `--log file` and `--log both`
    #[arg(long, global = true, env = "DROPZONE_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "DROPZONE_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Drop one or more files; only the first one is uploaded
    Upload {
        /// Files to drop, in order
        #[arg(value_name = "FILE", required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        upload: UploadArgs,
    },

    /// Pick a single file through the select affordance
    Select {
        /// File to pick; omit to dismiss the picker
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        #[command(flatten)]
        upload: UploadArgs,
    },

    /// Normalize a saved backend payload and print the result blocks
    Render {
        /// JSON payload file, or '-' for stdin
        #[arg(value_name = "PAYLOAD")]
        payload: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Backend upload endpoint
    #[arg(long, env = "DROPZONE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Declared media type, instead of the one implied by the file extension
    #[arg(long)]
    pub media_type: Option<String>,

    /// Connect timeout in milliseconds (transport default when unset)
    #[arg(long, env = "DROPZONE_CONNECT_TIMEOUT_MS")]
    pub connect_timeout_ms: Option<u64>,

    /// Whole-request timeout in milliseconds (transport default when unset)
    #[arg(long, env = "DROPZONE_REQUEST_TIMEOUT_MS")]
    pub request_timeout_ms: Option<u64>,

    /// Give up waiting for the upload after this many seconds
    #[arg(long)]
    pub wait_secs: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
