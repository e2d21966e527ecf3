//! Concurrent analysis of many documents.
//!
//! Each configured source is parsed and analysed on tokio's blocking pool,
//! with at most `max_concurrent` documents in flight. A failing document
//! produces a failed [`JobReport`] and never stops the remaining jobs.

use crate::analysis::{CountryAnalyser, DocumentAnalyser, Policy, WeatherAnalyser};
use crate::config::{AnalysisConfig, DocumentKind, DocumentSource};
use crate::constants::PROGRESS_TEMPLATE;
use crate::error::Result;
use crate::parser::{CountryRowMapper, CsvDocumentParser, DocumentParser, WeatherRowMapper};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, error, info, warn};

/// Owned result of analysing one document
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub kind: DocumentKind,
    pub policy: Policy,
    pub best_score: f64,
    /// Ids of every record tied for the best score, in document order
    pub ids: Vec<String>,
    /// Number of entries the document held
    pub entries: usize,
}

/// Outcome of one batch job
#[derive(Debug, Clone)]
pub struct JobReport {
    pub source: DocumentSource,
    pub outcome: std::result::Result<AnalysisSummary, String>,
    pub elapsed: Duration,
}

impl JobReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Parse and analyse a single document synchronously
pub fn analyse_source(source: &DocumentSource) -> Result<AnalysisSummary> {
    match source.kind {
        DocumentKind::Countries => analyse_with(
            &CsvDocumentParser::new(CountryRowMapper, source.delimiter, source.locale),
            &CountryAnalyser,
            source,
        ),
        DocumentKind::Weather => analyse_with(
            &CsvDocumentParser::new(WeatherRowMapper, source.delimiter, source.locale),
            &WeatherAnalyser,
            source,
        ),
    }
}

fn analyse_with<P, A>(parser: &P, analyser: &A, source: &DocumentSource) -> Result<AnalysisSummary>
where
    P: DocumentParser,
    A: DocumentAnalyser,
{
    let document = parser.parse_document(source.path())?;
    let matches = analyser.best_matches(&document)?;

    Ok(AnalysisSummary {
        kind: source.kind,
        policy: matches.policy(),
        best_score: matches.best_score(),
        ids: matches.ids().into_iter().map(str::to_string).collect(),
        entries: document.len(),
    })
}

/// Analyse every configured source; reports follow the configured order
pub async fn run_batch(config: &AnalysisConfig) -> Result<Vec<JobReport>> {
    config.validate()?;

    let total = config.sources.len();
    let pb = create_progress_bar(total, config.show_progress);
    let start = Instant::now();

    let reports = stream::iter(config.sources.iter().cloned())
        .map(|source| {
            let pb = pb.clone();
            async move {
                if let Some(file_name) = source.path().file_name() {
                    pb.set_message(format!("Analysing: {}", file_name.to_string_lossy()));
                }

                let job_start = Instant::now();
                let task_source = source.clone();
                let outcome =
                    match task::spawn_blocking(move || analyse_source(&task_source)).await {
                        Ok(Ok(summary)) => {
                            debug!(
                                "Analysed {}: {:?}",
                                source.path().display(),
                                summary.ids
                            );
                            Ok(summary)
                        }
                        Ok(Err(e)) => {
                            warn!("Analysis of {} failed: {}", source.path().display(), e);
                            Err(e.to_string())
                        }
                        Err(e) => {
                            error!("Analysis task for {} panicked: {}", source.path().display(), e);
                            Err(format!("analysis task failed: {}", e))
                        }
                    };
                pb.inc(1);

                JobReport {
                    source,
                    outcome,
                    elapsed: job_start.elapsed(),
                }
            }
        })
        .buffered(config.max_concurrent)
        .collect::<Vec<_>>()
        .await;

    pb.finish_and_clear();

    let failed = reports.iter().filter(|r| !r.is_success()).count();
    info!(
        "Batch finished: {} documents, {} failed in {:.2?}",
        total,
        failed,
        start.elapsed()
    );
    Ok(reports)
}

fn create_progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::with_template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
