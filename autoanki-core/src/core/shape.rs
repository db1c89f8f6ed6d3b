//! Shape validation of a parsed field tree.
//!
//! [`validate_field`] checks a [`Document`] against the fixed field layout and
//! either returns the extracted pieces as a [`FieldLayout`] or every rule the
//! tree breaks, as a [`ShapeError`].

use std::fmt;
use thiserror::Error;

use super::layout::{
    ATTR_CONTENTEDITABLE, ATTR_DATA, ATTR_FINAL_HASH, ATTR_HIDDEN, ATTR_NOTE_TYPE,
    ATTR_SOURCE_HASH, ATTR_TAGS, ATTR_TYPE, ATTR_UUID, FINAL_TAG, METADATA_TAG, RESOURCE_TAG,
    SOURCE_TAG, STYLE_IMPORT_TAG,
};
use super::markup::{Document, Element, Node};

/// A single broken rule, located by a path into the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeViolation {
    pub path: String,
    pub message: String,
}

impl ShapeViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { path: path.into(), message: message.into() }
    }
}

impl fmt::Display for ShapeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// All violations found in one tree. Displays one violation per line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ShapeError {
    violations: Vec<ShapeViolation>,
}

impl ShapeError {
    pub fn new(violations: Vec<ShapeViolation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[ShapeViolation] {
        &self.violations
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {violation}")?;
        }
        Ok(())
    }
}

/// Identity and digest attributes of the metadata region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataAttributes {
    pub uuid: String,
    pub note_type: String,
    pub tags: String,
    pub source_hash: String,
    pub final_hash: String,
}

/// A resource declaration marker found in the metadata region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMarker {
    pub data: String,
    pub media_type: Option<String>,
}

/// The pieces of a field that passed validation. Region texts still carry
/// their padding, and the source text is still escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    pub source_text: String,
    pub metadata: MetadataAttributes,
    pub markers: Vec<MediaMarker>,
    pub final_text: String,
}

/// Allowed attributes on one element. A strict rule rejects anything not listed.
struct AttributeRule {
    required: &'static [&'static str],
    optional: &'static [&'static str],
    strict: bool,
}

const SOURCE_ATTRIBUTES: AttributeRule = AttributeRule {
    required: &[ATTR_HIDDEN],
    optional: &[],
    strict: true,
};

const METADATA_ATTRIBUTES: AttributeRule = AttributeRule {
    required: &[ATTR_UUID, ATTR_NOTE_TYPE, ATTR_TAGS, ATTR_SOURCE_HASH, ATTR_FINAL_HASH],
    optional: &[],
    strict: true,
};

// Not strict: the host may inject its own attributes on the visible region.
const FINAL_ATTRIBUTES: AttributeRule = AttributeRule {
    required: &[ATTR_CONTENTEDITABLE],
    optional: &[],
    strict: false,
};

const RESOURCE_ATTRIBUTES: AttributeRule = AttributeRule {
    required: &[ATTR_DATA],
    optional: &[ATTR_TYPE],
    strict: true,
};

const STYLE_IMPORT_ATTRIBUTES: AttributeRule = AttributeRule {
    required: &[],
    optional: &[],
    strict: true,
};

/// Validates `doc` against the field layout.
///
/// # Errors
///
/// Returns a [`ShapeError`] listing every violation when the tree does not
/// hold exactly the source, metadata and final regions in that order, when
/// any region carries missing or unexpected attributes, or when the metadata
/// region holds anything other than well-formed media markers.
pub fn validate_field(doc: &Document) -> Result<FieldLayout, ShapeError> {
    let mut v = Validator::default();

    let regions: Vec<&Node> = significant(&doc.nodes).collect();
    if regions.len() != 3 {
        v.fail(
            "$",
            format!(
                "expected 3 regions (<{SOURCE_TAG}>, <{METADATA_TAG}>, <{FINAL_TAG}>), found {}",
                regions.len()
            ),
        );
    }

    let source = regions.first().copied().and_then(|node| {
        let el = v.element(node, SOURCE_TAG, "$[0]")?;
        v.attributes(el, SOURCE_TAG, &SOURCE_ATTRIBUTES);
        Some(v.opaque_text(el, SOURCE_TAG))
    });

    let metadata = regions.get(1).copied().and_then(|node| {
        let el = v.element(node, METADATA_TAG, "$[1]")?;
        v.attributes(el, METADATA_TAG, &METADATA_ATTRIBUTES);
        if el.attribute(ATTR_UUID).is_some_and(str::is_empty) {
            v.fail(format!("{METADATA_TAG}@{ATTR_UUID}"), "must not be empty");
        }
        let attributes = MetadataAttributes {
            uuid: attribute(el, ATTR_UUID),
            note_type: attribute(el, ATTR_NOTE_TYPE),
            tags: attribute(el, ATTR_TAGS),
            source_hash: attribute(el, ATTR_SOURCE_HASH),
            final_hash: attribute(el, ATTR_FINAL_HASH),
        };
        Some((attributes, v.markers(el)))
    });

    let final_text = regions.get(2).copied().and_then(|node| {
        let el = v.element(node, FINAL_TAG, "$[2]")?;
        v.attributes(el, FINAL_TAG, &FINAL_ATTRIBUTES);
        Some(v.opaque_text(el, FINAL_TAG))
    });

    match (source, metadata, final_text) {
        (Some(source_text), Some((metadata, markers)), Some(final_text)) if v.violations.is_empty() => {
            Ok(FieldLayout { source_text, metadata, markers, final_text })
        }
        _ => Err(ShapeError::new(v.violations)),
    }
}

fn significant(nodes: &[Node]) -> impl Iterator<Item = &Node> {
    nodes.iter().filter(|node| !node.is_blank())
}

fn attribute(el: &Element, name: &str) -> String {
    el.attribute(name).unwrap_or_default().to_string()
}

#[derive(Default)]
struct Validator {
    violations: Vec<ShapeViolation>,
}

impl Validator {
    fn fail(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(ShapeViolation::new(path, message));
    }

    fn element<'d>(&mut self, node: &'d Node, name: &str, path: &str) -> Option<&'d Element> {
        match node {
            Node::Element(el) if el.name == name => Some(el),
            Node::Element(el) => {
                self.fail(path, format!("expected <{name}>, found <{}>", el.name));
                None
            }
            Node::Text(text) => {
                self.fail(path, format!("expected <{name}>, found text {:?}", text.trim()));
                None
            }
        }
    }

    fn attributes(&mut self, el: &Element, path: &str, rule: &AttributeRule) {
        for required in rule.required {
            if el.attribute(required).is_none() {
                self.fail(format!("{path}@{required}"), "required attribute is missing");
            }
        }
        if rule.strict {
            for key in el.attributes.keys() {
                let known = rule.required.contains(&key.as_str()) || rule.optional.contains(&key.as_str());
                if !known {
                    self.fail(format!("{path}@{key}"), "unexpected attribute");
                }
            }
        }
    }

    fn opaque_text(&mut self, el: &Element, path: &str) -> String {
        if el.children.iter().any(|child| matches!(child, Node::Element(_))) {
            self.fail(path, "expected raw text content, found nested elements");
        }
        el.text()
    }

    fn markers(&mut self, metadata: &Element) -> Vec<MediaMarker> {
        let mut markers = Vec::new();
        for (i, node) in significant(&metadata.children).enumerate() {
            let path = format!("{METADATA_TAG}[{i}]");
            match node {
                Node::Element(el) if el.name == RESOURCE_TAG => {
                    self.attributes(el, &path, &RESOURCE_ATTRIBUTES);
                    if significant(&el.children).next().is_some() {
                        self.fail(&path, format!("<{RESOURCE_TAG}> marker must be empty"));
                    }
                    if let Some(data) = el.attribute(ATTR_DATA) {
                        markers.push(MediaMarker {
                            data: data.to_string(),
                            media_type: el.attribute(ATTR_TYPE).map(str::to_string),
                        });
                    }
                }
                Node::Element(el) if el.name == STYLE_IMPORT_TAG => {
                    self.attributes(el, &path, &STYLE_IMPORT_ATTRIBUTES);
                }
                Node::Element(el) => {
                    self.fail(path, format!("unexpected <{}> in metadata", el.name));
                }
                Node::Text(text) => {
                    self.fail(path, format!("unexpected text {:?} in metadata", text.trim()));
                }
            }
        }
        markers
    }
}
