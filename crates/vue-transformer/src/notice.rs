//! Non-fatal messages reported during a transform.

use std::fmt;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something was skipped or could not be translated.
    Info,
    /// The transform completed.
    Success,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Success => "success",
        })
    }
}

/// A message for the user that does not change the outcome of a transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// The severity tag.
    pub severity: Severity,
    /// The message.
    pub message: String,
    /// 1-indexed line and column in the source document.
    pub location: Option<(u32, u32)>,
}

impl Notice {
    /// Creates an informational notice at a source location.
    pub fn info(message: String, location: (u32, u32)) -> Self {
        Self {
            severity: Severity::Info,
            message,
            location: Some(location),
        }
    }

    /// Creates a success notice.
    pub fn success(message: String) -> Self {
        Self {
            severity: Severity::Success,
            message,
            location: None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some((line, column)) => {
                write!(f, "[{}] {}:{} {}", self.severity, line, column, self.message)
            }
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}
