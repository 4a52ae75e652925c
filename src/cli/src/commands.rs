use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tesmon_common::Config;

#[derive(Parser, Clone, Debug)]
#[clap(
    name = "tesmon",
    about = "Report test run events to Tesmon",
    version,
    after_help = "Configuration is read from TESMON_* environment variables, e.g. TESMON_TRE_BASE_URL or TESMON_ENVIRONMENT_ID and TESMON_API_TOKEN."
)]
pub struct Cli {
    /// TOML file layered under the TESMON_* environment variables
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to tesmon.log in this directory instead of stderr
    #[clap(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[clap(flatten)]
    pub target: TargetArgs,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Send one event and print the server's response
    Send {
        /// Unique event key
        event_key: String,

        /// Event body as JSON text
        event_body: Option<String>,
    },

    /// Show where events would be sent
    Info {
        /// Output information in JSON format
        #[clap(long)]
        json: bool,
    },
}

/// Overrides for the loaded configuration
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    #[clap(long, global = true)]
    pub base_url: Option<String>,

    #[clap(long, global = true)]
    pub environment_id: Option<String>,

    #[clap(long, global = true)]
    pub api_token: Option<String>,

    /// Applied to the connect and read timeouts
    #[clap(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,
}

impl TargetArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.tre_base_url = Some(base_url.clone());
            config.base_url = Some(base_url.clone());
        }
        if let Some(environment_id) = &self.environment_id {
            config.environment_id = Some(environment_id.clone());
        }
        if let Some(api_token) = &self.api_token {
            config.api_token = Some(api_token.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.connect_timeout_ms = timeout_ms;
            config.read_timeout_ms = timeout_ms;
        }
    }
}
