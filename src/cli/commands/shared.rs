//! Shared components for CLI commands

use crate::analysis::Policy;
use crate::batch::AnalysisSummary;
use crate::config::DocumentKind;
use crate::constants::LOG_TARGET;
use anyhow::{Context, anyhow};
use colored::*;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Set up structured logging on stderr
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {}", e))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Expand paths and glob patterns into files, keeping argument order
///
/// A literal path that matches nothing is kept so that the analysis
/// reports it as missing.
pub fn expand_patterns(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        let mut matched: Vec<PathBuf> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern '{}'", pattern))?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Skipping unreadable path: {}", e);
                    None
                }
            })
            .collect();

        if matched.is_empty() {
            debug!("Pattern '{}' matched nothing, using it as a path", pattern);
            paths.push(PathBuf::from(pattern));
        } else {
            matched.sort();
            paths.append(&mut matched);
        }
    }

    Ok(paths)
}

/// Human label of the score a document kind is ranked by
pub fn score_label(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Countries => "population density",
        DocumentKind::Weather => "temperature spread",
    }
}

pub fn format_summary(summary: &AnalysisSummary) -> String {
    let direction = match summary.policy {
        Policy::Max => "highest",
        Policy::Min => "smallest",
    };
    format!(
        "{} ({} {} {:.2})",
        summary.ids.join(", ").bold(),
        direction,
        score_label(summary.kind),
        summary.best_score
    )
}
