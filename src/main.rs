use anyhow::Result;
use clap::Parser;
use tokio::runtime::Runtime;

use band_sentry::{Cli, run};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Credentials from .env (if present) + CLI args
    dotenv::dotenv().ok();
    let args = Cli::parse();
    log::info!("🚀 Band Sentry starting with {:?}", args);

    // C. Run the monitor loop until killed
    let rt = Runtime::new()?;
    rt.block_on(run(args))
}
