//! Byte-level block scanner.
//!
//! Only top-level blocks are recognised. Block content is never parsed, with
//! the exception of `<template>` where nested `<template>` tags are counted so
//! the outer closing tag is found.

use crate::error::{SfcError, SfcErrorKind};
use crate::{Attribute, SfcBlock, SfcDocument};
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

const TAG_TEMPLATE: &[u8] = b"template";
const TAG_SCRIPT: &[u8] = b"script";

pub(crate) struct Splitter<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Splitter<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    pub(crate) fn split(mut self) -> Result<SfcDocument<'a>, SfcError> {
        let mut document = SfcDocument::default();

        while let Some(offset) = self.source[self.pos..].find('<') {
            self.pos += offset;

            if self.bytes[self.pos..].starts_with(b"<!--") {
                self.pos = match self.source[self.pos..].find("-->") {
                    Some(end) => self.pos + end + 3,
                    None => self.bytes.len(),
                };
                continue;
            }

            let open_start = self.pos;
            let name_start = open_start + 1;
            if !self
                .bytes
                .get(name_start)
                .is_some_and(|b| b.is_ascii_alphabetic())
            {
                self.pos += 1;
                continue;
            }
            let name_len = self.bytes[name_start..]
                .iter()
                .take_while(|b| is_tag_name_byte(**b))
                .count();
            let tag = &self.source[name_start..name_start + name_len];
            self.pos = name_start + name_len;

            let (attributes, self_closing) = self.parse_attributes(tag, open_start)?;
            let content_start = self.pos;
            let content_end = if self_closing {
                content_start
            } else {
                self.find_closing(tag, open_start)?
            };

            let block = SfcBlock {
                tag: SmolStr::new(tag),
                content: &self.source[content_start..content_end],
                range: range(content_start, content_end),
                attributes,
            };

            let tag_bytes = tag.as_bytes();
            if tag_bytes.eq_ignore_ascii_case(TAG_TEMPLATE) {
                if document.template.is_some() {
                    return Err(duplicate(tag, open_start, name_start + name_len));
                }
                document.template = Some(block);
            } else if tag_bytes.eq_ignore_ascii_case(TAG_SCRIPT) {
                if document.script.is_some() {
                    return Err(duplicate(tag, open_start, name_start + name_len));
                }
                document.script = Some(block);
            } else {
                document.custom_blocks.push(block);
            }
        }

        Ok(document)
    }

    /// Parses attributes up to and including the closing `>` of an opening tag.
    /// Returns whether the tag was self-closing.
    fn parse_attributes(
        &mut self,
        tag: &str,
        open_start: usize,
    ) -> Result<(Vec<Attribute>, bool), SfcError> {
        let mut attributes = Vec::new();
        let unterminated = || {
            SfcError::new(
                SfcErrorKind::UnterminatedTag {
                    tag: tag.to_string(),
                },
                range(open_start, open_start + 1 + tag.len()),
            )
        };

        loop {
            self.skip_whitespace();
            match self.bytes.get(self.pos) {
                None => return Err(unterminated()),
                Some(b'>') => {
                    self.pos += 1;
                    return Ok((attributes, false));
                }
                Some(b'/') if self.bytes.get(self.pos + 1) == Some(&b'>') => {
                    self.pos += 2;
                    return Ok((attributes, true));
                }
                Some(_) => {}
            }

            let name_start = self.pos;
            while let Some(&b) = self.bytes.get(self.pos) {
                if b.is_ascii_whitespace() || b == b'=' || b == b'>' || b == b'/' {
                    break;
                }
                self.pos += 1;
            }
            if self.pos == name_start {
                // Stray `/` or `=`
                self.pos += 1;
                continue;
            }
            let name = SmolStr::new(&self.source[name_start..self.pos]);

            self.skip_whitespace();
            let mut value = None;
            if self.bytes.get(self.pos) == Some(&b'=') {
                self.pos += 1;
                self.skip_whitespace();
                match self.bytes.get(self.pos) {
                    Some(&quote) if quote == b'"' || quote == b'\'' => {
                        let value_start = self.pos + 1;
                        let len = self.bytes[value_start..]
                            .iter()
                            .position(|b| *b == quote)
                            .ok_or_else(unterminated)?;
                        value = Some(SmolStr::new(
                            &self.source[value_start..value_start + len],
                        ));
                        self.pos = value_start + len + 1;
                    }
                    Some(_) => {
                        let value_start = self.pos;
                        while let Some(&b) = self.bytes.get(self.pos) {
                            if b.is_ascii_whitespace() || b == b'>' {
                                break;
                            }
                            self.pos += 1;
                        }
                        value = Some(SmolStr::new(&self.source[value_start..self.pos]));
                    }
                    None => return Err(unterminated()),
                }
            }

            attributes.push(Attribute { name, value });
        }
    }

    /// Finds the end of the block content and moves past the closing tag.
    fn find_closing(&mut self, tag: &str, open_start: usize) -> Result<usize, SfcError> {
        let tag_bytes = tag.as_bytes();
        let nests = tag_bytes.eq_ignore_ascii_case(TAG_TEMPLATE);
        let mut depth = 1usize;
        let mut cursor = self.pos;

        while let Some(offset) = self.source[cursor..].find('<') {
            cursor += offset;
            let rest = &self.bytes[cursor..];

            if rest.get(1) == Some(&b'/') && tag_matches(&rest[2..], tag_bytes) {
                depth -= 1;
                if depth == 0 {
                    let content_end = cursor;
                    self.pos = match self.source[cursor..].find('>') {
                        Some(end) => cursor + end + 1,
                        None => self.bytes.len(),
                    };
                    return Ok(content_end);
                }
                cursor += 2 + tag_bytes.len();
                continue;
            }

            if nests && tag_matches(&rest[1..], tag_bytes) && !self.is_self_closing(cursor) {
                depth += 1;
            }
            cursor += 1;
        }

        Err(SfcError::new(
            SfcErrorKind::UnclosedBlock {
                tag: tag.to_string(),
            },
            range(open_start, open_start + 1 + tag.len()),
        ))
    }

    fn is_self_closing(&self, tag_start: usize) -> bool {
        match self.source[tag_start..].find('>') {
            Some(end) => end > 0 && self.bytes[tag_start + end - 1] == b'/',
            None => false,
        }
    }

    fn skip_whitespace(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
    }
}

/// Whether `rest` starts with `tag` followed by a tag-name boundary.
fn tag_matches(rest: &[u8], tag: &[u8]) -> bool {
    if rest.len() < tag.len() || !rest[..tag.len()].eq_ignore_ascii_case(tag) {
        return false;
    }
    match rest.get(tag.len()) {
        None => true,
        Some(b) => b.is_ascii_whitespace() || *b == b'>' || *b == b'/',
    }
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn duplicate(tag: &str, start: usize, end: usize) -> SfcError {
    SfcError::new(
        SfcErrorKind::DuplicateBlock {
            tag: tag.to_ascii_lowercase(),
        },
        range(start, end),
    )
}

fn range(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32))
}
