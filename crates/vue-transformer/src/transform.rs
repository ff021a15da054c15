//! Main transformation logic.

use crate::accumulator::translate;
use crate::assemble::assemble;
use crate::classify::classify_methods;
use crate::component::find_component_object;
use crate::error::TransformError;
use crate::naming::resolve_class_name;
use crate::notice::Notice;
use crate::script::{Script, ScriptSyntax};
use crate::state::{collect_state, CollectOptions};
use crate::template::escape_template;
use indexmap::IndexMap;
use smol_str::SmolStr;
use std::path::Path;

/// How the input text is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceMode {
    /// A single-file component with `<template>` and `<script>` blocks.
    Sfc,
    /// A plain script; JSX is accepted.
    #[default]
    Script,
}

impl SourceMode {
    /// Picks the mode from a file extension: `.vue` files are single-file components.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("vue") => Self::Sfc,
            _ => Self::Script,
        }
    }
}

/// Options for transformation.
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    /// The filename of the source file; its stem names the class when the
    /// component declares no `name`.
    pub filename: Option<String>,
    /// How the input is laid out.
    pub mode: SourceMode,
    /// Forces TypeScript parsing on or off. Detected from `lang` or the file
    /// extension when unset.
    pub typescript: Option<bool>,
}

/// The result of transformation.
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// The generated class component module.
    pub script: String,
    /// The escaped template markup (single-file components only).
    pub template: Option<String>,
    /// The generated class name.
    pub component_name: String,
    /// Registered sub-components, tag name to referenced expression.
    pub components: IndexMap<SmolStr, String>,
    /// Whether the script was parsed as TypeScript.
    pub typescript: bool,
    /// Non-fatal messages, ending with a success notice.
    pub notices: Vec<Notice>,
}

/// Transforms an options-object component into a class component.
pub fn transform(source: &str, options: TransformOptions) -> Result<TransformResult, TransformError> {
    let filename = options.filename.as_deref();
    let extension = filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str());

    let (text, first_line, syntax, template) = match options.mode {
        SourceMode::Sfc => {
            let document = vue_sfc::split(source)?;
            let script = document.script.ok_or(TransformError::MissingScript)?;
            let start = usize::from(script.range.start());
            let first_line = source[..start].matches('\n').count() as u32;
            let typescript = options.typescript.unwrap_or_else(|| script.is_typescript());
            let syntax = ScriptSyntax {
                typescript,
                jsx: !typescript || script.lang() == Some("tsx"),
            };
            let template = document
                .template
                .map(|template| escape_template(template.content));
            (script.content, first_line, syntax, template)
        }
        SourceMode::Script => {
            let typescript = options
                .typescript
                .unwrap_or(matches!(extension, Some("ts" | "tsx")));
            let syntax = ScriptSyntax {
                typescript,
                jsx: extension != Some("ts"),
            };
            (source, 0, syntax, None)
        }
    };

    tracing::debug!(
        filename = filename.unwrap_or("<input>"),
        mode = ?options.mode,
        typescript = syntax.typescript,
        jsx = syntax.jsx,
        "transforming component"
    );

    let script = Script::parse(text, syntax, first_line)?;
    let component =
        find_component_object(script.module()).ok_or(TransformError::MissingComponent)?;

    let mut notices = Vec::new();
    let state = collect_state(
        component,
        &script,
        CollectOptions {
            collect_components: options.mode == SourceMode::Sfc,
        },
        &mut notices,
    )?;
    let component_name = resolve_class_name(state.name.as_deref(), filename)?;

    let classified = classify_methods(component, &state);
    let accumulator = translate(
        &classified,
        &state,
        &script,
        template.as_deref(),
        &mut notices,
    )?;
    let output = assemble(&component_name, &state, &accumulator, &script)?;

    notices.push(Notice::success("Transform success".to_string()));
    Ok(TransformResult {
        script: output,
        template,
        component_name,
        components: state.components,
        typescript: syntax.typescript,
        notices,
    })
}
