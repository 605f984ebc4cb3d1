use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lampctl_tui::config::{self, Config};
use lampctl_tui::tui;

#[derive(Parser)]
#[command(name = "lampctl")]
#[command(author, version, about = "Terminal dashboard for the PIR night-light controller", long_about = None)]
struct Cli {
    /// Base URL of the controller (e.g. http://lamp.local)
    #[arg(short, long)]
    url: Option<String>,

    /// Status poll interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing. The default is quiet so log lines do not fight
    // with the rendered frames; RUST_LOG still overrides.
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load();
    let url = config::resolve_url(cli.url, &config);
    let interval_ms = config::resolve_poll_interval(cli.interval_ms, &config);

    tui::run(url, interval_ms).await
}
