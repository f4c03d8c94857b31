use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vidforge")]
#[command(author, version, about = "Topic-to-published-video pipeline")]
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
    /// Start the pipeline server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Run a single pipeline from the command line and print the response
    Run {
        /// Video topic
        #[arg(long)]
        topic: String,

        /// Narration tone
        #[arg(long, default_value = "Educational")]
        tone: String,

        /// Target duration in seconds
        #[arg(long, default_value = "120")]
        duration: u32,

        /// Intended audience
        #[arg(long, default_value = "General")]
        audience: String,

        /// Closing call to action
        #[arg(long, default_value = "Subscribe for more!")]
        call_to_action: String,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },
}
