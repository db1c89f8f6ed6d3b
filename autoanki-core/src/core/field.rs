//! Records produced by decoding a field.

use serde::{Deserialize, Serialize};

use super::hash::ContentHasher;

/// One content region of a decoded field, with its change status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    pub content: String,
    /// Digest embedded when the field was last encoded.
    pub stored_hash: String,
    /// Digest of `content` as decoded now.
    pub computed_hash: String,
    /// `computed_hash != stored_hash`: the region was edited outside the codec.
    pub field_changed: bool,
}

impl FieldMetadata {
    pub fn new(content: String, stored_hash: String, hasher: &dyn ContentHasher) -> Self {
        let computed_hash = hasher.digest(&content);
        let field_changed = computed_hash != stored_hash;
        Self { content, stored_hash, computed_hash, field_changed }
    }
}

/// Everything recovered from one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedField {
    /// The field text exactly as it was decoded.
    pub raw: String,
    pub source_content: FieldMetadata,
    pub final_content: FieldMetadata,
    pub style_media_files: Vec<String>,
    pub script_media_files: Vec<String>,
    pub uuid: String,
    pub model_name: String,
    /// Space-separated tag list.
    pub tags: String,
}

impl DecodedField {
    /// Returns `true` if either content region was edited outside the codec.
    pub fn is_changed(&self) -> bool {
        self.source_content.field_changed || self.final_content.field_changed
    }

    pub fn tag_list(&self) -> Vec<&str> {
        self.tags.split_whitespace().collect()
    }
}

/// Returns `true` if `content` no longer matches the digest stored in `stored`.
///
/// Only `stored.stored_hash` is consulted.
pub fn has_content_changed(content: &str, stored: &FieldMetadata, hasher: &dyn ContentHasher) -> bool {
    hasher.digest(content) != stored.stored_hash
}
