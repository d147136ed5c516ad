//! CLI command definitions

use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::TripRequestBody;

/// Default server URL for client subcommands
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

/// tp - AI trip planner
#[derive(Parser)]
#[command(
    name = "tp",
    about = "AI trip planner: LLM-drafted itineraries enriched with maps data",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Plan a trip through a running server
    Plan {
        /// Departure city
        #[arg(long = "from")]
        from: String,

        /// Destination city
        #[arg(long = "to")]
        to: String,

        /// Number of travelers (1-10)
        #[arg(short = 'n', long, default_value_t = 1)]
        travelers: i64,

        /// Travel month as YYYY-MM
        #[arg(short, long)]
        date: String,

        /// Trip length in days (1-30, server default 7)
        #[arg(short = 'D', long)]
        duration: Option<i64>,

        /// Interest to include; repeatable
        #[arg(short, long = "interest")]
        interests: Vec<String>,

        /// Server URL
        #[arg(short, long, env = "TP_SERVER", default_value = DEFAULT_SERVER)]
        server: String,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Show the server's diagnostics report
    Health {
        /// Server URL
        #[arg(short, long, env = "TP_SERVER", default_value = DEFAULT_SERVER)]
        server: String,
    },
}

/// Build a request body from `plan` arguments
pub fn plan_request(
    from: &str,
    to: &str,
    travelers: i64,
    date: &str,
    duration: Option<i64>,
    interests: &[String],
) -> TripRequestBody {
    let interests: BTreeMap<String, bool> = interests
        .iter()
        .map(|i| i.trim().to_lowercase())
        .filter(|i| !i.is_empty())
        .map(|i| (i, true))
        .collect();

    TripRequestBody {
        from_location: Some(from.to_string()),
        destination: Some(to.to_string()),
        travelers: Some(travelers),
        travel_date: Some(date.to_string()),
        duration,
        interests: Some(interests),
    }
}
