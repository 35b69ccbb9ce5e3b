use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use arena_forge::cli::Args;
use arena_forge::core::io::{self, ForgeError};
use arena_forge::core::pipeline::{CancelFlag, Pipeline};
use arena_forge::core::provider::ProviderConfig;
use arena_forge::core::{logging, report};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init();
    info!("arena-forge v{} starting", arena_forge::VERSION);

    // Input problems are fatal before any dispatch; nothing is written.
    let mut heroes = io::load_heroes(&args.input)?;
    if let Some(limit) = args.limit {
        heroes.truncate(limit);
        info!("dry run: processing first {limit} heroes");
    }

    let provider_config = ProviderConfig::from_parts(
        args.provider.as_str(),
        args.api_key.as_deref(),
        args.model.as_deref(),
    )
    .context("provider configuration")?;
    let provider = provider_config.create_provider();

    println!(
        "Processing {} heroes with the '{}' backend ({} concurrent calls)",
        heroes.len(),
        provider.id(),
        args.concurrency,
    );

    let cancel = CancelFlag::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received, draining in-flight generation");
                cancel.cancel();
            }
        });
    }

    let pipeline = Pipeline::new(provider, args.forge_config(), cancel.clone());
    let records = pipeline.run(heroes).await;
    let summary = pipeline.summary();

    if cancel.is_cancelled() {
        eprintln!("Pipeline interrupted by user; output not written.");
        return Err(ForgeError::Interrupted.into());
    }

    io::write_heroes(&args.output, &records)?;
    report::print_run_report(&records, &summary);
    println!("Saved to: {}", args.output.display());

    Ok(())
}
