use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[clap(
    name = "nr-telemetry",
    about = "Ships Lambda telemetry and function logs to New Relic",
    version
)]
pub struct Cli {
    /// TOML file read before NEW_RELIC_* environment variables
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Send raw telemetry records, one file per record
    Telemetry {
        /// ARN of the invoked function, used to recover the function name
        #[clap(long)]
        arn: String,
        #[clap(required = true)]
        files: Vec<PathBuf>,
    },

    /// Send each line of a file as a function log line
    Logs {
        #[clap(long, default_value = "")]
        request_id: String,
        file: PathBuf,
    },
}
