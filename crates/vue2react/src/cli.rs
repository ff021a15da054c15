//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use serde::Deserialize;

/// Converts Vue options-object components to React class components.
#[derive(Debug, Parser)]
#[command(name = "vue2react")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Component file, or a directory to convert recursively
    pub source: Utf8PathBuf,

    /// Output file (script mode), output directory (single-file mode), or
    /// output root when SOURCE is a directory
    pub dest: Utf8PathBuf,

    /// How to read each source file [default: auto]
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Glob patterns to ignore when SOURCE is a directory
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Source layout selection.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Single-file components for `.vue` files, plain scripts otherwise
    #[default]
    Auto,
    /// Always split `<template>` and `<script>` blocks
    Sfc,
    /// Always treat the whole file as a script
    Script,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output
    Json,
}
