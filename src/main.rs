//! Same-origin framing proxy binary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use frame_proxy::config::load_config;
use frame_proxy::lifecycle;

#[derive(Parser)]
#[command(name = "frame-proxy")]
#[command(about = "Same-origin proxy and JSON view for embedded browsing", long_about = None)]
struct Cli {
    /// TOML configuration file; PORT and HOST override its listener.
    #[arg(short, long, env = "FRAME_PROXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("frame-proxy: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match lifecycle::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Proxy exited with error");
            eprintln!("frame-proxy: {}", e);
            ExitCode::FAILURE
        }
    }
}
