// src/main.rs

use rungraph::config::{self, Settings};
use rungraph::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("rungraph error: {err:#}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    let cfg = config::load_config(args.config.as_deref())?;
    let settings = Settings::new(&args, cfg);
    logging::init_logging(settings.log_level)?;
    run(args, settings).await?;
    Ok(())
}
