/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! yaml-merge CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "yaml-merge")]
#[command(version)]
#[command(about = "Merge layered YAML documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge YAML files, each one layered over the ones before it
    Merge {
        /// Files to merge, base first
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Remove nulls spelled out in the result (`null`, `~`)
        #[arg(long)]
        prune_explicit: bool,

        /// Remove keys left without a value in the result
        #[arg(long)]
        prune_implicit: bool,

        /// Read every document of each file instead of only the first
        #[arg(long)]
        all_documents: bool,

        /// Spaces per indentation level
        #[arg(long, default_value_t = 2)]
        indent: usize,

        /// Write output to FILE instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Remove null values from a YAML file
    Prune {
        /// Input file
        file: PathBuf,

        /// Remove nulls spelled out (`null`, `~`)
        #[arg(long)]
        explicit: bool,

        /// Remove keys without a value
        #[arg(long)]
        implicit: bool,

        /// Spaces per indentation level
        #[arg(long, default_value_t = 2)]
        indent: usize,

        /// Write output to FILE instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Print the parsed node tree of a YAML file
    Dump {
        /// Input file
        file: PathBuf,

        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yaml_merge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            files,
            prune_explicit,
            prune_implicit,
            all_documents,
            indent,
            output,
        } => commands::merge::execute(commands::merge::MergeArgs {
            files,
            prune_explicit,
            prune_implicit,
            all_documents,
            indent,
            output,
        }),
        Commands::Prune {
            file,
            explicit,
            implicit,
            indent,
            output,
        } => commands::prune::execute(commands::prune::PruneArgs {
            file,
            explicit,
            implicit,
            indent,
            output,
        }),
        Commands::Dump { file, json } => commands::dump::execute(&file, json),
    }
}
