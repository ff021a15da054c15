//! Output writing.

use crate::orchestrator::CliError;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use vue_transformer::{SourceMode, TransformResult};

/// Writes a transform result under `dest`.
///
/// Script sources are written to `dest` itself. Single-file components get a
/// directory holding `index.js` (`index.ts` for TypeScript) and, when the
/// component has markup, `template.js`.
///
/// Returns the written paths.
pub fn write_output(
    dest: &Utf8Path,
    mode: SourceMode,
    result: &TransformResult,
) -> Result<Vec<Utf8PathBuf>, CliError> {
    match mode {
        SourceMode::Script => {
            if let Some(parent) = dest.parent().filter(|parent| !parent.as_str().is_empty()) {
                create_dir(parent)?;
            }
            write_file(dest, &result.script)?;
            Ok(vec![dest.to_path_buf()])
        }
        SourceMode::Sfc => {
            create_dir(dest)?;
            let index = dest.join(if result.typescript {
                "index.ts"
            } else {
                "index.js"
            });
            write_file(&index, &result.script)?;

            let mut written = vec![index];
            if let Some(template) = &result.template {
                let path = dest.join("template.js");
                write_file(&path, template)?;
                written.push(path);
            }
            Ok(written)
        }
    }
}

fn create_dir(path: &Utf8Path) -> Result<(), CliError> {
    fs::create_dir_all(path).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Utf8Path, contents: &str) -> Result<(), CliError> {
    tracing::debug!(path = %path, bytes = contents.len(), "writing output");
    fs::write(path, contents).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}
