//! Batch command: many documents, one report line each

use super::shared::{expand_patterns, format_summary};
use crate::batch;
use crate::cli::args::BatchArgs;
use anyhow::bail;
use colored::*;
use tracing::info;

pub async fn run_batch(args: &BatchArgs, show_progress: bool) -> anyhow::Result<()> {
    if !args.has_inputs() {
        bail!("no documents given, use --weather and/or --countries");
    }

    let weather = expand_patterns(&args.weather)?;
    let countries = expand_patterns(&args.countries)?;
    let config = args.to_config(weather, countries, show_progress);
    info!("Running batch over {} documents", config.sources.len());

    let reports = batch::run_batch(&config).await?;

    for report in &reports {
        let path = report.source.path().display();
        match &report.outcome {
            Ok(summary) => println!(
                "{} {} [{}] {}",
                "✓".green(),
                path,
                report.source.kind,
                format_summary(summary)
            ),
            Err(message) => println!("{} {} {}", "✗".red(), path, message.red()),
        }
    }

    let failed = reports.iter().filter(|r| !r.is_success()).count();
    if failed > 0 {
        bail!("{} of {} documents failed", failed, reports.len());
    }
    Ok(())
}
