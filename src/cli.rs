use clap::Parser;
use std::path::PathBuf;

/// Restaurant reservation caller - dispatches AI voice agents to book tables
#[derive(Parser, Debug, Clone)]
#[command(name = "concierge", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "CONCIERGE_CONFIG", default_value = "concierge.toml")]
    pub config: PathBuf,

    /// Use the mock provider (no credentials, no live calls)
    #[arg(long, env = "CONCIERGE_MOCK", num_args = 0..=1, default_missing_value = "true")]
    pub mock: Option<bool>,

    /// Fallback phone number dialed when no target is given
    #[arg(long, env = "CONCIERGE_PHONE")]
    pub phone: Option<String>,
}
