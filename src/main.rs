use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use prep_console::app;
use prep_console::config::ServiceConfig;
use prep_console::service::HttpTestService;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Test to attempt
    test_id: String,

    /// Base URL of the test service API
    #[arg(long, default_value = "http://localhost:5000/api")]
    server: String,

    /// Bearer token; falls back to the PREP_TOKEN environment variable
    #[arg(long)]
    token: Option<String>,

    /// Log file; the terminal itself is taken over by the UI
    #[arg(long, default_value = "prep-console.log")]
    log_file: PathBuf,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,
}

fn init_logging(path: &Path, level: log::LevelFilter) -> anyhow::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(fern::log_file(path)?)
        .apply()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file, args.log_level)?;

    // Fail closed before any request goes out.
    let token = args
        .token
        .or_else(|| std::env::var("PREP_TOKEN").ok())
        .filter(|token| !token.is_empty())
        .context("an auth token is required: pass --token or set PREP_TOKEN")?;

    let config = ServiceConfig::new(args.server, token);
    let service = Arc::new(HttpTestService::new(config));

    log::info!("starting attempt of test {}", args.test_id);
    app::run(service, args.test_id).await
}
