//! Command-line definition

use clap::{Parser, Subcommand};

/// Backend URL used when neither `--backend-url` nor `BACKEND_API_URL` is set
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Sender id used for test messages
pub const DEFAULT_SENDER: &str = "test_user";

/// Glass Bot CLI
#[derive(Debug, Parser)]
#[command(name = "glassbot-cli")]
#[command(author, version, about = "WhatsApp Glass Bot operator CLI", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that the backend is up and answers bot commands
    ///
    /// Probes /api/health, then sends /help and /all through
    /// /api/whatsapp_in. Exits non-zero if any check fails.
    Verify {
        /// Backend base URL
        #[arg(long, env = "BACKEND_API_URL", default_value = DEFAULT_BACKEND_URL)]
        backend_url: String,
    },

    /// Send one message to the backend as if it came from WhatsApp
    ///
    /// Example: glassbot-cli send "/search Jane"
    Send {
        /// Message body, forwarded verbatim
        body: String,

        /// Sender id to report
        #[arg(short, long, default_value = DEFAULT_SENDER)]
        from: String,

        /// Backend base URL
        #[arg(long, env = "BACKEND_API_URL", default_value = DEFAULT_BACKEND_URL)]
        backend_url: String,
    },
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
