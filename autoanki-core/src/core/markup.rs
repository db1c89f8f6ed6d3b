//! A small parser for the delimited pseudo-markup stored in a field.
//!
//! The grammar is the XML-like subset the field codec writes: elements with
//! quoted, unquoted or valueless attributes, self-closing tags, comments and
//! text. It is not an HTML5 parser: there are no void elements and no
//! implicit tag closing, so a truncated or hand-mangled field is an error.
//!
//! Elements whose path is registered with [`MarkupParser::with_opaque_path`]
//! are not descended into: everything up to the first matching closing tag is
//! captured verbatim as a single text child. Regions that hold a user's own
//! note content are parsed this way so their markup never leaks into the
//! tree being validated.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

use super::escape::unescape_html;

/// A failure to parse the field text, located by 1-based line and column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self { line, column, message: message.into() }
    }
}

/// A parsed markup element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub name: String,
    /// Attribute values are entity-decoded. Valueless attributes map to `""`.
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Concatenates the element's direct text children, verbatim.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}

/// A node in the parsed tree. Text is kept exactly as it appeared in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// Returns `true` for text nodes that hold nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Text(text) if text.trim().is_empty())
    }
}

/// The top-level nodes of a parsed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    pub nodes: Vec<Node>,
}

/// Parser configured with the set of element paths to treat as opaque.
///
/// A path is the dot-joined element names from the document root, e.g.
/// `"autoanki-metadata.style"`.
#[derive(Debug, Clone, Default)]
pub struct MarkupParser {
    opaque_paths: HashSet<String>,
}

impl MarkupParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks elements at `path` as opaque: their content is captured as raw text.
    #[must_use]
    pub fn with_opaque_path(mut self, path: impl Into<String>) -> Self {
        self.opaque_paths.insert(path.into());
        self
    }

    /// Parses `input` into a [`Document`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for unterminated tags, comments or attribute
    /// values, closing tags that do not match the open element, elements left
    /// open at end of input, duplicate attributes, and empty tag names.
    pub fn parse(&self, input: &str) -> Result<Document, ParseError> {
        let mut cursor = Cursor { input, pos: 0 };
        let nodes = self.parse_nodes(&mut cursor, "", None)?;
        Ok(Document { nodes })
    }

    fn parse_nodes(
        &self,
        cur: &mut Cursor<'_>,
        path: &str,
        closing: Option<&str>,
    ) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            if cur.at_end() {
                return match closing {
                    Some(name) => Err(cur.error(format!("unexpected end of input, expected </{name}>"))),
                    None => Ok(nodes),
                };
            }

            if cur.starts_with("</") {
                let start = cur.pos;
                cur.advance(2);
                let name = cur.take_while(is_name_byte);
                cur.skip_whitespace();
                if cur.peek() != Some(b'>') {
                    return Err(cur.error_at(start, "unterminated closing tag"));
                }
                cur.advance(1);
                return match closing {
                    Some(expected) if expected == name => Ok(nodes),
                    Some(expected) => Err(cur.error_at(
                        start,
                        format!("mismatched closing tag </{name}>, expected </{expected}>"),
                    )),
                    None => Err(cur.error_at(start, format!("unexpected closing tag </{name}>"))),
                };
            }

            if cur.starts_with("<!--") {
                let start = cur.pos;
                match cur.rest().find("-->") {
                    Some(end) => cur.advance(end + 3),
                    None => return Err(cur.error_at(start, "unterminated comment")),
                }
                continue;
            }

            if cur.starts_with("<") {
                nodes.push(Node::Element(self.parse_element(cur, path)?));
                continue;
            }

            let rest = cur.rest();
            let end = rest.find('<').unwrap_or(rest.len());
            nodes.push(Node::Text(rest[..end].to_string()));
            cur.advance(end);
        }
    }

    fn parse_element(&self, cur: &mut Cursor<'_>, parent_path: &str) -> Result<Element, ParseError> {
        let start = cur.pos;
        cur.advance(1);
        let name = cur.take_while(is_name_byte);
        if name.is_empty() {
            return Err(cur.error_at(start, "expected a tag name after '<'"));
        }

        let mut attributes = BTreeMap::new();
        let self_closing = loop {
            cur.skip_whitespace();
            match cur.peek() {
                None => return Err(cur.error_at(start, format!("unterminated <{name}> tag"))),
                Some(b'>') => {
                    cur.advance(1);
                    break false;
                }
                Some(b'/') if cur.starts_with("/>") => {
                    cur.advance(2);
                    break true;
                }
                Some(_) => {
                    let attr_start = cur.pos;
                    let (key, value) = parse_attribute(cur)?;
                    if attributes.contains_key(&key) {
                        return Err(cur.error_at(
                            attr_start,
                            format!("duplicate attribute '{key}' on <{name}>"),
                        ));
                    }
                    attributes.insert(key, value);
                }
            }
        };

        let path = if parent_path.is_empty() {
            name.to_string()
        } else {
            format!("{parent_path}.{name}")
        };

        let children = if self_closing {
            Vec::new()
        } else if self.opaque_paths.contains(&path) {
            let close = format!("</{name}>");
            let Some(end) = cur.rest().find(&close) else {
                return Err(cur.error_at(start, format!("<{name}> is never closed, expected {close}")));
            };
            let raw = &cur.rest()[..end];
            let children = if raw.is_empty() { Vec::new() } else { vec![Node::Text(raw.to_string())] };
            cur.advance(end + close.len());
            children
        } else {
            self.parse_nodes(cur, &path, Some(name))?
        };

        Ok(Element { name: name.to_string(), attributes, children })
    }
}

fn parse_attribute(cur: &mut Cursor<'_>) -> Result<(String, String), ParseError> {
    let key = cur.take_while(|b| {
        !b.is_ascii_whitespace() && !matches!(b, b'=' | b'/' | b'>' | b'"' | b'\'' | b'<')
    });
    if key.is_empty() {
        let found = cur.rest().chars().next().unwrap_or(' ');
        return Err(cur.error(format!("unexpected '{found}' inside tag")));
    }
    let key = key.to_string();

    cur.skip_whitespace();
    if cur.peek() != Some(b'=') {
        return Ok((key, String::new()));
    }
    cur.advance(1);
    cur.skip_whitespace();

    match cur.peek() {
        Some(quote @ (b'"' | b'\'')) => {
            let start = cur.pos;
            cur.advance(1);
            let Some(end) = cur.rest().find(quote as char) else {
                return Err(cur.error_at(start, format!("unterminated value for attribute '{key}'")));
            };
            let value = unescape_html(&cur.rest()[..end]);
            cur.advance(end + 1);
            Ok((key, value))
        }
        Some(_) => {
            let raw = cur.take_while(|b| !b.is_ascii_whitespace() && b != b'>');
            if raw.is_empty() {
                return Err(cur.error(format!("missing value for attribute '{key}'")));
            }
            Ok((key, unescape_html(raw)))
        }
        None => Err(cur.error(format!("unexpected end of input in attribute '{key}'"))),
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

/// Byte cursor over the input. `pos` only ever stops on ASCII delimiters,
/// so every slice taken from it lies on a char boundary.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    fn skip_whitespace(&mut self) {
        self.take_while(|b| b.is_ascii_whitespace());
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        let len = self.input.as_bytes()[start..]
            .iter()
            .take_while(|b| pred(**b))
            .count();
        self.pos += len;
        &self.input[start..self.pos]
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, pos: usize, message: impl Into<String>) -> ParseError {
        let before = &self.input[..pos];
        let line = before.matches('\n').count() + 1;
        let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
        ParseError::new(line, column, message)
    }
}
