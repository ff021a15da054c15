//! Split error types.

use text_size::TextRange;
use thiserror::Error;

/// An error that occurred while splitting a single-file component.
#[derive(Debug, Clone, Error)]
#[error("{kind}")]
pub struct SfcError {
    /// The kind of error.
    pub kind: SfcErrorKind,
    /// The range of the offending block's opening tag.
    pub range: TextRange,
}

impl SfcError {
    /// Creates a new split error.
    pub fn new(kind: SfcErrorKind, range: TextRange) -> Self {
        Self { kind, range }
    }
}

/// The kind of split error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SfcErrorKind {
    /// A second `<template>` or `<script>` block was found.
    #[error("a single-file component can only contain one <{tag}> block")]
    DuplicateBlock {
        /// The repeated tag name.
        tag: String,
    },

    /// A block was opened but never closed.
    #[error("unclosed block: <{tag}>")]
    UnclosedBlock {
        /// The tag name of the unclosed block.
        tag: String,
    },

    /// An opening tag ran to the end of input without `>`.
    #[error("unterminated opening tag: <{tag}")]
    UnterminatedTag {
        /// The tag name.
        tag: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use text_size::TextSize;

    #[test]
    fn test_error_display() {
        let error = SfcError::new(
            SfcErrorKind::DuplicateBlock {
                tag: "script".to_string(),
            },
            TextRange::new(TextSize::from(0), TextSize::from(8)),
        );
        assert_eq!(
            error.to_string(),
            "a single-file component can only contain one <script> block"
        );
    }
}
