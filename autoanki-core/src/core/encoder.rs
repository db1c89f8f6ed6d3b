//! Composes source content, final content and note metadata into one field.

use log::debug;

use super::escape::escape_html;
use super::hash::ContentHasher;
use super::layout::{
    pad_region, ATTR_CONTENTEDITABLE, ATTR_FINAL_HASH, ATTR_HIDDEN, ATTR_NOTE_TYPE,
    ATTR_SOURCE_HASH, ATTR_TAGS, ATTR_UUID, FINAL_TAG, METADATA_TAG, REGION_SEPARATOR, SOURCE_TAG,
};
use super::media::media_markers;
use super::note::Note;

/// Encodes `note`, its rendered `final_content` and its `source_content` into
/// field text.
///
/// The source region is escaped; the final region is embedded verbatim and
/// marked non-editable so the host editor does not casually alter it.
///
/// # Panics
///
/// Panics if `note.uuid` is empty. A note must have an identity before it is
/// written to the host.
pub fn encode_field(
    note: &Note,
    final_content: &str,
    source_content: &str,
    hasher: &dyn ContentHasher,
) -> String {
    assert!(!note.uuid.is_empty(), "cannot encode a note without a uuid");

    let source_hash = hasher.digest(source_content);
    let final_hash = hasher.digest(final_content);

    let source_region = format!(
        "<{SOURCE_TAG} {ATTR_HIDDEN}>{}</{SOURCE_TAG}>",
        pad_region(&escape_html(source_content))
    );

    let metadata_region = format!(
        "<{METADATA_TAG}\n \
         {ATTR_UUID}=\"{}\"\n \
         {ATTR_NOTE_TYPE}=\"{}\"\n \
         {ATTR_TAGS}=\"{}\"\n \
         {ATTR_SOURCE_HASH}=\"{}\"\n \
         {ATTR_FINAL_HASH}=\"{}\">{}</{METADATA_TAG}>",
        escape_html(&note.uuid),
        escape_html(&note.model_name),
        escape_html(&note.joined_tags()),
        escape_html(&source_hash),
        escape_html(&final_hash),
        pad_region(&media_markers(note)),
    );

    let final_region = format!(
        "<{FINAL_TAG} {ATTR_CONTENTEDITABLE}=\"false\">{}</{FINAL_TAG}>",
        pad_region(final_content)
    );

    debug!(
        "encoded note {} ({} source bytes, {} final bytes)",
        note.uuid,
        source_content.len(),
        final_content.len()
    );

    [source_region, metadata_region, final_region].join(REGION_SEPARATOR)
}
