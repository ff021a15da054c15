//! Vue single-file component splitter.
//!
//! Separates a `.vue` document into its `<template>` and `<script>` blocks.
//! Block content is returned verbatim; nothing inside a block is parsed.
//!
//! # Example
//!
//! ```
//! use vue_sfc::split;
//!
//! let source = r#"
//! <template>
//!   <p>{{ count }}</p>
//! </template>
//!
//! <script>
//! export default { data() { return { count: 0 } } }
//! </script>
//! "#;
//!
//! let document = split(source).unwrap();
//! assert_eq!(document.template.unwrap().content.trim(), "<p>{{ count }}</p>");
//! assert!(document.script.is_some());
//! ```

mod error;
mod splitter;

pub use error::{SfcError, SfcErrorKind};
pub use text_size::{TextRange, TextSize};

use smol_str::SmolStr;

/// A single attribute on a block's opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name.
    pub name: SmolStr,
    /// The unquoted value, `None` for boolean attributes such as `scoped`.
    pub value: Option<SmolStr>,
}

/// A top-level block of a single-file component.
#[derive(Debug, Clone)]
pub struct SfcBlock<'a> {
    /// The tag name as written.
    pub tag: SmolStr,
    /// The raw text between the opening and closing tags.
    pub content: &'a str,
    /// The range of `content` in the document.
    pub range: TextRange,
    /// Attributes of the opening tag.
    pub attributes: Vec<Attribute>,
}

impl SfcBlock<'_> {
    /// Returns the attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name.as_str() == name)
    }

    /// Returns the `lang` attribute value (e.g. `ts`).
    pub fn lang(&self) -> Option<&str> {
        self.attribute("lang")
            .and_then(|attr| attr.value.as_deref())
    }

    /// Whether the block content is written in TypeScript.
    pub fn is_typescript(&self) -> bool {
        matches!(self.lang(), Some("ts" | "tsx"))
    }
}

/// A split single-file component.
#[derive(Debug, Clone, Default)]
pub struct SfcDocument<'a> {
    /// The `<template>` block.
    pub template: Option<SfcBlock<'a>>,
    /// The `<script>` block.
    pub script: Option<SfcBlock<'a>>,
    /// Every other top-level block (`<style>`, custom blocks), in order.
    pub custom_blocks: Vec<SfcBlock<'a>>,
}

/// Splits a single-file component into its blocks.
pub fn split(source: &str) -> Result<SfcDocument<'_>, SfcError> {
    splitter::Splitter::new(source).split()
}
