//! Text emission helpers.
//!
//! Output is assembled from slices of the original script with targeted
//! edits applied, so bodies keep their original formatting.

use std::ops::Range;

/// Indentation of class members.
pub(crate) const MEMBER_INDENT: &str = "  ";

/// A replacement of `start..end` (offsets into the script text) with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Edit {
    pub start: usize,
    pub end: usize,
    pub text: &'static str,
}

impl Edit {
    pub(crate) fn insert(at: usize, text: &'static str) -> Self {
        Self {
            start: at,
            end: at,
            text,
        }
    }

    pub(crate) fn delete(start: usize, end: usize) -> Self {
        Self::replace(start, end, "")
    }

    pub(crate) fn replace(start: usize, end: usize, text: &'static str) -> Self {
        Self { start, end, text }
    }
}

/// Applies edits to `source[range]`.
///
/// Edits outside the range or overlapping an earlier edit are dropped.
pub(crate) fn apply_edits(source: &str, range: Range<usize>, mut edits: Vec<Edit>) -> String {
    edits.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    let mut out = String::with_capacity(range.len() + edits.len() * 8);
    let mut last = range.start;
    for edit in edits {
        if edit.start < last || edit.end > range.end {
            continue;
        }
        out.push_str(&source[last..edit.start]);
        out.push_str(edit.text);
        last = edit.end;
    }
    out.push_str(&source[last..range.end]);
    out
}

/// Re-indents a multi-line snippet.
///
/// The first line is kept as is (it continues a line already being written).
/// The remaining lines lose their common leading whitespace and are prefixed
/// with `indent`. Snippets containing template literals are returned
/// unchanged since their line contents are significant.
pub(crate) fn reindent(text: &str, indent: &str) -> String {
    if text.contains('`') {
        return text.to_string();
    }

    let mut lines = text.split('\n');
    let first = lines.next().unwrap_or_default();
    let rest: Vec<&str> = lines.collect();
    if rest.is_empty() {
        return first.to_string();
    }

    let common = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out = String::with_capacity(text.len() + rest.len() * indent.len());
    out.push_str(first.trim_end());
    for line in rest {
        out.push('\n');
        let line = line.trim_end();
        if line.trim().is_empty() {
            continue;
        }
        out.push_str(indent);
        out.push_str(line.get(common..).unwrap_or_else(|| line.trim_start()));
    }
    out
}

/// Formats an object key, quoting it when it is not a valid identifier.
pub(crate) fn property_key(name: &str) -> String {
    if is_valid_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

/// A single-quoted string literal.
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

pub(crate) fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Whether the parameter starting at `start` is inside a parenthesized list.
///
/// Single-parameter arrows (`msg => ...`) have none.
pub(crate) fn opens_params(source: &str, start: usize) -> bool {
    source[..start].trim_end().ends_with('(')
}

/// Finds the offset of the `)` closing a parameter list that starts at `start`.
///
/// Brackets are balanced and string contents skipped, so defaults and type
/// annotations inside the list do not end it early.
pub(crate) fn params_end(source: &str, start: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut idx = start;

    while idx < bytes.len() {
        let b = bytes[idx];
        if let Some(q) = quote {
            if b == b'\\' {
                idx += 2;
                continue;
            }
            if b == q {
                quote = None;
            }
            idx += 1;
            continue;
        }
        match b {
            b'\'' | b'"' | b'`' => quote = Some(b),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' if depth > 0 => depth -= 1,
            b')' => return Some(idx),
            _ => {}
        }
        idx += 1;
    }
    None
}
