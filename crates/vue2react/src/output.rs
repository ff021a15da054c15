//! Output formatting.

use crate::cli::OutputFormat;
use camino::Utf8PathBuf;
use serde::Serialize;
use vue_transformer::Notice;

/// The outcome of converting one file.
#[derive(Debug)]
pub struct FileReport {
    /// The source file.
    pub source: Utf8PathBuf,
    /// Written paths and notices, or the error that aborted the file.
    pub outcome: Result<Converted, String>,
}

/// A successfully converted file.
#[derive(Debug)]
pub struct Converted {
    /// The generated class name.
    pub component_name: String,
    /// Paths written.
    pub written: Vec<Utf8PathBuf>,
    /// Notices from the transform.
    pub notices: Vec<Notice>,
}

/// A file report for JSON output.
#[derive(Debug, Serialize)]
pub struct FormattedReport {
    /// The source file path.
    pub filename: String,
    /// `success` or `error`.
    pub status: &'static str,
    /// The generated class name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Paths written.
    pub outputs: Vec<String>,
    /// Notices from the transform.
    pub notices: Vec<FormattedNotice>,
    /// The error message for failed files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A notice for JSON output.
#[derive(Debug, Serialize)]
pub struct FormattedNotice {
    /// `info` or `success`.
    pub severity: String,
    /// The message.
    pub message: String,
    /// 1-indexed line number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// 1-indexed column number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl From<&Notice> for FormattedNotice {
    fn from(notice: &Notice) -> Self {
        Self {
            severity: notice.severity.to_string(),
            message: notice.message.clone(),
            line: notice.location.map(|(line, _)| line),
            column: notice.location.map(|(_, column)| column),
        }
    }
}

/// Formats file reports for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a collection of reports.
    pub fn format(&self, reports: &[FileReport]) -> String {
        match self.format {
            OutputFormat::Human => self.format_human(reports),
            OutputFormat::Json => self.format_json(reports),
        }
    }

    fn format_human(&self, reports: &[FileReport]) -> String {
        let mut output = String::new();

        for report in reports {
            output.push_str(report.source.as_str());
            output.push('\n');
            match &report.outcome {
                Ok(converted) => {
                    for notice in &converted.notices {
                        output.push_str(&format!("  {}\n", notice));
                    }
                    for path in &converted.written {
                        output.push_str(&format!("  -> {}\n", path));
                    }
                }
                Err(error) => output.push_str(&format!("  [error] {}\n", error)),
            }
        }

        output
    }

    fn format_json(&self, reports: &[FileReport]) -> String {
        let formatted: Vec<FormattedReport> = reports
            .iter()
            .map(|report| match &report.outcome {
                Ok(converted) => FormattedReport {
                    filename: report.source.to_string(),
                    status: "success",
                    component: Some(converted.component_name.clone()),
                    outputs: converted.written.iter().map(|p| p.to_string()).collect(),
                    notices: converted.notices.iter().map(FormattedNotice::from).collect(),
                    error: None,
                },
                Err(error) => FormattedReport {
                    filename: report.source.to_string(),
                    status: "error",
                    component: None,
                    outputs: Vec::new(),
                    notices: Vec::new(),
                    error: Some(error.clone()),
                },
            })
            .collect();

        serde_json::to_string_pretty(&formatted).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Summary of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of files processed.
    pub file_count: usize,
    /// Number of files that failed.
    pub failed_count: usize,
}

impl RunSummary {
    /// Formats the summary line.
    pub fn format(&self) -> String {
        let file_word = if self.file_count == 1 {
            "file"
        } else {
            "files"
        };
        format!(
            "vue2react converted {} of {} {} ({} failed)",
            self.file_count - self.failed_count,
            self.file_count,
            file_word,
            self.failed_count
        )
    }
}
