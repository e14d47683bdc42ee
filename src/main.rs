// Copyright 2026 Quill Contributors
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code, unused_imports)]

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;
mod config;
mod harvest;
mod model;

#[derive(Parser)]
#[command(
    name = "quill",
    about = "Quill — harvest text corpora for char-RNN experiments",
    version,
    after_help = "Run 'quill <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Harvest the essay corpus (one file per essay)
    Essays {
        /// Destination directory (must already exist)
        #[arg(long, default_value = config::ESSAY_OUT_DIR)]
        out_dir: String,
    },
    /// Harvest the poem corpus (one combined file)
    Poems {
        /// Destination file for the combined corpus
        #[arg(long, default_value = config::POEM_OUT_PATH)]
        out: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var("QUILL_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("QUILL_QUIET", "1");
    }

    let default_level = if cli.verbose { "quill=debug" } else { "quill=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Essays { out_dir } => cli::essays_cmd::run(&out_dir).await,
        Commands::Poems { out } => cli::poems_cmd::run(&out).await,
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !cli::output::is_quiet() && !cli::output::is_json() {
            eprintln!("  Error: {e:#}");
        }
        if cli::output::is_json() {
            cli::output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        }
        std::process::exit(1);
    }

    result
}
