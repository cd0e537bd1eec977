//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SpecForge - Validate and canonicalize assembly program specifications.
#[derive(Debug, Parser)]
#[command(name = "specforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides ./.specforge.yml)
    #[arg(short, long, global = true, env = "SPECFORGE_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate a document and render its canonical artifact
    Forge(ForgeArgs),

    /// Validate one or more documents
    Check(CheckArgs),

    /// Print the JSON Schema of the input document format
    Schema,
}

/// Arguments for the `forge` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ForgeArgs {
    /// Input document (YAML or JSON)
    pub input: PathBuf,

    /// Write the artifact here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Artifact format: text, yaml
    #[arg(long, default_value = "text", value_parser = ["text", "yaml"])]
    pub format: String,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Input documents (YAML or JSON)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output format: human, json, sarif
    #[arg(long, default_value = "human", value_parser = ["human", "json", "sarif"])]
    pub format: String,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}
