//! The configured entry point for encoding and decoding fields.

use super::decoder::decode_field;
use super::encoder::encode_field;
use super::error::Result;
use super::field::{has_content_changed, DecodedField, FieldMetadata};
use super::hash::ContentHasher;
use super::note::Note;
use super::settings::CodecSettings;

/// Encodes and decodes fields with a fixed digest algorithm.
///
/// Holds no mutable state, so one codec can serve any number of concurrent
/// calls over disjoint inputs.
#[derive(Debug, Clone, Default)]
pub struct FieldCodec {
    settings: CodecSettings,
}

impl FieldCodec {
    pub fn new(settings: CodecSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CodecSettings {
        &self.settings
    }

    fn hasher(&self) -> &dyn ContentHasher {
        &self.settings.hash_algorithm
    }

    /// Digest of `content` under this codec's algorithm.
    pub fn hash(&self, content: &str) -> String {
        self.hasher().digest(content)
    }

    /// See [`encode_field`].
    ///
    /// # Panics
    ///
    /// Panics if `note.uuid` is empty.
    pub fn encode(&self, note: &Note, final_content: &str, source_content: &str) -> String {
        encode_field(note, final_content, source_content, self.hasher())
    }

    /// See [`decode_field`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::AutoankiError::MalformedField`] or
    /// [`crate::AutoankiError::InvalidFieldShape`] when `field_text` is not a
    /// valid encoded field.
    pub fn decode(&self, field_name: &str, field_text: &str) -> Result<DecodedField> {
        decode_field(field_name, field_text, self.hasher())
    }

    pub fn has_content_changed(&self, content: &str, stored: &FieldMetadata) -> bool {
        has_content_changed(content, stored, self.hasher())
    }
}
