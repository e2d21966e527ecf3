//! Command implementations for the best-match CLI
//!
//! Each command lives in its own module; this one only dispatches.

pub mod analyse;
pub mod batch;
pub mod shared;

use crate::cli::args::{Args, Commands};
use crate::config::DocumentKind;
use shared::setup_logging;

/// Main command runner
pub async fn run(args: Args) -> anyhow::Result<()> {
    setup_logging(args.get_log_level())?;

    match &args.command {
        Commands::Weather(document) => {
            analyse::run_analyse(document.to_source(DocumentKind::Weather)).await
        }
        Commands::Countries(document) => {
            analyse::run_analyse(document.to_source(DocumentKind::Countries)).await
        }
        Commands::Batch(batch_args) => batch::run_batch(batch_args, args.show_progress()).await,
    }
}
