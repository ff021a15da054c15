//! Transform error types.

use crate::state::Slot;
use smol_str::SmolStr;
use thiserror::Error;
use vue_sfc::SfcError;

/// A fatal error that aborts the transform of one component.
///
/// Members that merely cannot be classified are not errors; they are
/// reported as [`Notice`](crate::Notice)s and left out of the output.
#[derive(Debug, Clone, Error)]
pub enum TransformError {
    /// The single-file component could not be split into blocks.
    #[error("failed to split component: {0}")]
    Split(#[from] SfcError),

    /// A single-file component without a `<script>` block.
    #[error("component has no <script> block")]
    MissingScript,

    /// The script could not be parsed.
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        /// The parser's message.
        message: String,
        /// 1-indexed line.
        line: u32,
        /// 1-indexed column.
        column: u32,
    },

    /// The script does not export a component options object.
    #[error("no exported component object found")]
    MissingComponent,

    /// Neither a `name` option nor a usable file name was available.
    #[error("cannot resolve a component name; add a `name` option or pass a file name")]
    MissingComponentName,

    /// The same identifier was declared in two slots.
    #[error("`{name}` is declared in both `{first}` and `{second}`")]
    SlotConflict {
        /// The identifier.
        name: SmolStr,
        /// The slot that declared it first.
        first: Slot,
        /// The slot that declared it again.
        second: Slot,
    },

    /// A computed value was called with arguments, which a getter cannot take.
    #[error("computed `{name}` is called with arguments at {line}:{column}")]
    ComputedCalledWithArguments {
        /// The computed name.
        name: SmolStr,
        /// 1-indexed line.
        line: u32,
        /// 1-indexed column.
        column: u32,
    },
}
