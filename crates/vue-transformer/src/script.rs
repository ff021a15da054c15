//! Script parsing and source slicing.

use crate::error::TransformError;
use std::ops::Range;
use swc_common::{sync::Lrc, BytePos, FileName, SourceMap, Span, Spanned};
use swc_ecma_ast::{ImportDecl, Module, ModuleDecl, ModuleItem};
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// Which syntax extensions the parser accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSyntax {
    /// Parse as TypeScript.
    pub typescript: bool,
    /// Accept embedded JSX markup.
    pub jsx: bool,
}

impl ScriptSyntax {
    fn to_swc(self) -> Syntax {
        if self.typescript {
            Syntax::Typescript(TsSyntax {
                tsx: self.jsx,
                ..Default::default()
            })
        } else {
            Syntax::Es(EsSyntax {
                jsx: self.jsx,
                ..Default::default()
            })
        }
    }
}

/// A parsed script together with its text.
///
/// Everything the transformer emits is sliced out of `text` by span, so the
/// original formatting of method bodies survives.
#[derive(Debug)]
pub struct Script {
    text: String,
    start: BytePos,
    first_line: u32,
    module: Module,
}

impl Script {
    /// Parses `text` as an ES module.
    ///
    /// `first_line` is the 0-indexed line of the document where the script
    /// starts; it only affects reported positions.
    pub fn parse(
        text: &str,
        syntax: ScriptSyntax,
        first_line: u32,
    ) -> Result<Self, TransformError> {
        let cm: Lrc<SourceMap> = Default::default();
        let fm = cm.new_source_file(
            FileName::Custom("component-script".into()).into(),
            text.to_string(),
        );
        let start = fm.start_pos;

        let mut parser = Parser::new(syntax.to_swc(), StringInput::from(&*fm), None);
        let parsed = parser.parse_module();
        let recovered = parser.take_errors();

        let to_error = |err: swc_ecma_parser::error::Error| {
            let offset = err.span().lo.0.saturating_sub(start.0) as usize;
            let (line, column) = line_col(text, offset, first_line);
            TransformError::Parse {
                message: err.kind().msg().into_owned(),
                line,
                column,
            }
        };
        let module = parsed.map_err(to_error)?;
        if let Some(err) = recovered.into_iter().next() {
            return Err(to_error(err));
        }

        Ok(Self {
            text: text.to_string(),
            start,
            first_line,
            module,
        })
    }

    /// The parsed module.
    pub fn module(&self) -> &Module {
        &self.module
    }

    /// The script text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Converts a position to a byte offset into [`Self::text`].
    pub fn offset(&self, pos: BytePos) -> usize {
        (pos.0.saturating_sub(self.start.0) as usize).min(self.text.len())
    }

    /// Converts a span to a byte range into [`Self::text`].
    pub fn range(&self, span: Span) -> Range<usize> {
        self.offset(span.lo)..self.offset(span.hi)
    }

    /// The source text covered by `span`.
    pub fn slice(&self, span: Span) -> &str {
        &self.text[self.range(span)]
    }

    /// 1-indexed line and column of a position, relative to the document.
    pub fn line_col(&self, pos: BytePos) -> (u32, u32) {
        line_col(&self.text, self.offset(pos), self.first_line)
    }

    /// Top-level import declarations in source order.
    pub fn imports(&self) -> Vec<ImportDecl> {
        self.module
            .body
            .iter()
            .filter_map(|item| match item {
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => Some(import.clone()),
                _ => None,
            })
            .collect()
    }
}

fn line_col(text: &str, offset: usize, first_line: u32) -> (u32, u32) {
    let before = &text[..offset.min(text.len())];
    let line = before.matches('\n').count() as u32;
    let line_start = before.rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    (
        first_line + line + 1,
        before[line_start..].chars().count() as u32 + 1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_module() {
        let script = Script::parse(
            "import a from 'a'\nexport default {}",
            ScriptSyntax::default(),
            0,
        )
        .unwrap();
        assert_eq!(script.module().body.len(), 2);
        assert_eq!(script.imports().len(), 1);
        assert_eq!(script.slice(script.imports()[0].span), "import a from 'a'");
    }

    #[test]
    fn test_parse_jsx_requires_flag() {
        let source = "export default { render() { return <div/> } }";
        assert!(Script::parse(source, ScriptSyntax::default(), 0).is_err());
        let syntax = ScriptSyntax {
            jsx: true,
            ..Default::default()
        };
        assert!(Script::parse(source, syntax, 0).is_ok());
    }

    #[test]
    fn test_parse_error_position() {
        let err = Script::parse("let a = 1;\nlet = ;", ScriptSyntax::default(), 3).unwrap_err();
        match err {
            TransformError::Parse { line, .. } => assert_eq!(line, 5),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_typescript() {
        let syntax = ScriptSyntax {
            typescript: true,
            jsx: false,
        };
        let script = Script::parse("let a: number = 1; export default {}", syntax, 0);
        assert!(script.is_ok());
    }
}
