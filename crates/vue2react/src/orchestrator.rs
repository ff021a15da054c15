//! Main orchestration logic.

use crate::cli::{Args, Mode};
use crate::config::Config;
use crate::output::{Converted, FileReport, Formatter, RunSummary};
use crate::writer::write_output;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use std::fs;
use std::io;
use thiserror::Error;
use vue_transformer::{transform, SourceMode, TransformError, TransformOptions};
use walkdir::WalkDir;

/// Orchestration errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Failed to read a file or directory.
    #[error("failed to read {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write output.
    #[error("failed to write {path}: {source}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    /// The transform rejected the component.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// A path that is not valid UTF-8.
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(String),
}

/// Patterns ignored in every directory walk.
const DEFAULT_IGNORES: &[&str] = &["**/node_modules/**", "**/dist/**"];

/// One file to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub source: Utf8PathBuf,
    pub dest: Utf8PathBuf,
    pub mode: SourceMode,
}

/// Runs the conversion and prints the reports.
pub fn run(args: &Args) -> Result<RunSummary, CliError> {
    let cwd = std::env::current_dir().map_err(|source| CliError::Read {
        path: Utf8PathBuf::from("."),
        source,
    })?;
    let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| CliError::NonUtf8Path(e.to_string()))?;
    let config = Config::load(&cwd);
    let mode = args.mode.or(config.mode).unwrap_or_default();

    let jobs = if args.source.is_dir() {
        let mut patterns = args.ignore.clone();
        patterns.extend(config.ignore.iter().cloned());
        let ignore_set = build_ignore_set(&patterns)?;
        collect_jobs(
            &args.source,
            &args.dest,
            mode,
            &config.file_extensions(),
            &ignore_set,
        )?
    } else {
        vec![Job {
            source: args.source.clone(),
            dest: args.dest.clone(),
            mode: resolve_mode(mode, &args.source),
        }]
    };
    tracing::debug!(files = jobs.len(), "collected jobs");

    let reports: Vec<FileReport> = jobs
        .par_iter()
        .map(|job| FileReport {
            source: job.source.clone(),
            outcome: convert(job).map_err(|e| e.to_string()),
        })
        .collect();

    let summary = RunSummary {
        file_count: reports.len(),
        failed_count: reports.iter().filter(|r| r.outcome.is_err()).count(),
    };

    let formatter = Formatter::new(args.output);
    println!("{}", formatter.format(&reports).trim_end());
    if matches!(args.output, crate::cli::OutputFormat::Human) && reports.len() > 1 {
        println!("{}", summary.format());
    }

    Ok(summary)
}

/// Reads, transforms and writes one file.
fn convert(job: &Job) -> Result<Converted, CliError> {
    let source = fs::read_to_string(&job.source).map_err(|source| CliError::Read {
        path: job.source.clone(),
        source,
    })?;

    let result = transform(
        &source,
        TransformOptions {
            filename: Some(job.source.to_string()),
            mode: job.mode,
            typescript: None,
        },
    )?;
    let written = write_output(&job.dest, job.mode, &result)?;

    Ok(Converted {
        component_name: result.component_name,
        written,
        notices: result.notices,
    })
}

/// Applies `auto` to a concrete file.
pub fn resolve_mode(mode: Mode, path: &Utf8Path) -> SourceMode {
    match mode {
        Mode::Auto => SourceMode::from_path(path),
        Mode::Sfc => SourceMode::Sfc,
        Mode::Script => SourceMode::Script,
    }
}

fn build_ignore_set(patterns: &[String]) -> Result<GlobSet, CliError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| CliError::InvalidGlob(e.to_string()))?;
        builder.add(glob);
    }
    for pattern in DEFAULT_IGNORES {
        if let Ok(glob) = Glob::new(pattern) {
            builder.add(glob);
        }
    }
    builder
        .build()
        .map_err(|e| CliError::InvalidGlob(e.to_string()))
}

/// Finds the files under `source_root` and mirrors each under `dest_root`.
///
/// Single-file components map to a directory named after the file stem;
/// scripts keep their file name.
fn collect_jobs(
    source_root: &Utf8Path,
    dest_root: &Utf8Path,
    mode: Mode,
    extensions: &[&str],
    ignore_set: &GlobSet,
) -> Result<Vec<Job>, CliError> {
    let mut jobs = Vec::new();

    for entry in WalkDir::new(source_root).sort_by_file_name() {
        let entry = entry.map_err(|e| CliError::Read {
            path: source_root.to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = Utf8PathBuf::try_from(entry.into_path())
            .map_err(|e| CliError::NonUtf8Path(e.to_string()))?;

        let file_name = path.file_name().unwrap_or("");
        if !extensions.iter().any(|ext| file_name.ends_with(ext)) {
            continue;
        }
        let relative = path.strip_prefix(source_root).unwrap_or(path.as_path());
        if ignore_set.is_match(relative.as_str()) {
            continue;
        }

        let file_mode = resolve_mode(mode, &path);
        let dest = match file_mode {
            SourceMode::Sfc => dest_root.join(relative.with_extension("")),
            SourceMode::Script => dest_root.join(relative),
        };
        jobs.push(Job {
            source: path.clone(),
            dest,
            mode: file_mode,
        });
    }

    Ok(jobs)
}
