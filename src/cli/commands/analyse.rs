//! Single document analysis command

use super::shared::format_summary;
use crate::batch::analyse_source;
use crate::config::DocumentSource;
use anyhow::Context;
use colored::*;
use tokio::task;
use tracing::info;

/// Analyse one document and print its tie set
pub async fn run_analyse(source: DocumentSource) -> anyhow::Result<()> {
    info!(
        "Analysing {} document {} (delimiter {:?}, locale {})",
        source.kind,
        source.path().display(),
        source.delimiter as char,
        source.locale
    );

    let task_source = source.clone();
    let summary = task::spawn_blocking(move || analyse_source(&task_source))
        .await
        .context("analysis task failed")?
        .with_context(|| format!("failed to analyse {}", source.path().display()))?;

    println!(
        "{} {}",
        "Best match:".bright_green(),
        format_summary(&summary)
    );
    Ok(())
}
