use best_match::cli::{args::Args, commands};
use clap::Parser;
use colored::*;
use std::process;

fn main() {
    let args = Args::parse();

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            Ok(()) = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(anyhow::anyhow!("analysis interrupted by user"))
            }
        }
    });

    if let Err(error) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), error);
        process::exit(1);
    }
}
