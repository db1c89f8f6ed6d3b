//! Recovers a [`DecodedField`] from field text and classifies each region as
//! changed or unchanged.

use log::{debug, info, warn};

use super::error::{AutoankiError, Result};
use super::escape::unescape_html;
use super::field::{DecodedField, FieldMetadata};
use super::hash::ContentHasher;
use super::layout::{strip_padding, FINAL_TAG, METADATA_TAG, SOURCE_TAG, STYLE_IMPORT_TAG};
use super::markup::MarkupParser;
use super::note::MediaKind;
use super::shape::{validate_field, MediaMarker};

/// Parser for field text. Both content regions and the stylesheet imports are
/// opaque: their content belongs to the user and is never parsed as markup.
fn field_parser() -> MarkupParser {
    MarkupParser::new()
        .with_opaque_path(SOURCE_TAG)
        .with_opaque_path(FINAL_TAG)
        .with_opaque_path(format!("{METADATA_TAG}.{STYLE_IMPORT_TAG}"))
}

/// Decodes `field_text`, read from the field named `field_name`.
///
/// # Errors
///
/// Returns [`AutoankiError::MalformedField`] if the text is not well-formed
/// markup, or [`AutoankiError::InvalidFieldShape`] if it parses but does not
/// have the field layout. Neither case is ever reported as "unchanged".
pub fn decode_field(
    field_name: &str,
    field_text: &str,
    hasher: &dyn ContentHasher,
) -> Result<DecodedField> {
    let doc = field_parser().parse(field_text).map_err(|reason| {
        warn!("field '{field_name}' is not well-formed: {reason}");
        AutoankiError::MalformedField {
            field_name: field_name.to_string(),
            raw: field_text.to_string(),
            reason,
        }
    })?;

    let layout = validate_field(&doc).map_err(|reason| {
        warn!(
            "field '{field_name}' does not match the field layout ({} violations)",
            reason.violations().len()
        );
        AutoankiError::InvalidFieldShape {
            field_name: field_name.to_string(),
            raw: field_text.to_string(),
            tree: serde_json::to_string_pretty(&doc).unwrap_or_else(|e| format!("<unprintable: {e}>")),
            reason,
        }
    })?;

    let source = unescape_html(&layout.source_text);
    let source_content = FieldMetadata::new(
        strip_padding(&source).to_string(),
        layout.metadata.source_hash,
        hasher,
    );
    let final_content = FieldMetadata::new(
        strip_padding(&layout.final_text).to_string(),
        layout.metadata.final_hash,
        hasher,
    );

    if source_content.field_changed {
        info!("source content of field '{field_name}' changed outside Autoanki");
    }
    if final_content.field_changed {
        info!("final content of field '{field_name}' changed outside Autoanki");
    }

    let style_media_files = files_of_kind(&layout.markers, MediaKind::Style);
    let script_media_files = files_of_kind(&layout.markers, MediaKind::Script);

    debug!(
        "decoded field '{field_name}' of note {} ({} style, {} script media)",
        layout.metadata.uuid,
        style_media_files.len(),
        script_media_files.len()
    );

    Ok(DecodedField {
        raw: field_text.to_string(),
        source_content,
        final_content,
        style_media_files,
        script_media_files,
        uuid: layout.metadata.uuid,
        model_name: layout.metadata.note_type,
        tags: layout.metadata.tags,
    })
}

/// Filenames of the markers whose media type maps to `kind`, in field order.
fn files_of_kind(markers: &[MediaMarker], kind: MediaKind) -> Vec<String> {
    markers
        .iter()
        .filter(|m| m.media_type.as_deref().and_then(MediaKind::from_media_type) == Some(kind))
        .map(|m| m.data.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::encoder::encode_field;
    use crate::core::hash::HashAlgorithm;
    use crate::core::note::{MediaRef, Note};

    fn note() -> Note {
        Note {
            uuid: "b7a2".into(),
            model_name: "Basic (and reversed)".into(),
            tags: vec!["lang::rust".into(), "deck".into()],
            style_files: vec![MediaRef::new("one.css"), MediaRef::new("two.css")],
            script_files: vec![MediaRef::new("run.js")],
            media_files: vec![MediaRef::new("img.png")],
        }
    }

    #[test]
    fn test_decode_field_recovers_encoded_note() {
        let hasher = HashAlgorithm::Sha256;
        let text = encode_field(&note(), "<p>x &lt; y</p>", "x < y", &hasher);
        let decoded = decode_field("Front", &text, &hasher).unwrap();

        assert_eq!(decoded.raw, text);
        assert_eq!(decoded.source_content.content, "x < y");
        assert_eq!(decoded.final_content.content, "<p>x &lt; y</p>");
        assert!(!decoded.is_changed());
        assert_eq!(decoded.uuid, "b7a2");
        assert_eq!(decoded.model_name, "Basic (and reversed)");
        assert_eq!(decoded.tags, "lang::rust deck");
        assert_eq!(decoded.style_media_files, vec!["one.css", "two.css"]);
        assert_eq!(decoded.script_media_files, vec!["run.js"]);
    }

    #[test]
    fn test_decode_field_detects_final_edit() {
        let hasher = HashAlgorithm::Sha256;
        let text = encode_field(&note(), "<p>answer</p>", "answer", &hasher);
        let edited = text.replace("<p>answer</p>", "<p>answer, edited</p>");
        let decoded = decode_field("Back", &edited, &hasher).unwrap();
        assert!(decoded.final_content.field_changed);
        assert!(!decoded.source_content.field_changed);
        assert_eq!(decoded.final_content.content, "<p>answer, edited</p>");
    }

    #[test]
    fn test_decode_field_with_other_hasher_reports_changes() {
        let text = encode_field(&note(), "f", "s", &HashAlgorithm::Sha256);
        let decoded = decode_field("Front", &text, &HashAlgorithm::Blake3).unwrap();
        assert!(decoded.source_content.field_changed);
        assert!(decoded.final_content.field_changed);
    }

    #[test]
    fn test_decode_field_rejects_malformed_text() {
        let hasher = HashAlgorithm::Sha256;
        let text = encode_field(&note(), "f", "s", &hasher);
        let truncated = &text[..text.len() - 5];
        let err = decode_field("Front", truncated, &hasher).unwrap_err();
        assert!(matches!(err, AutoankiError::MalformedField { .. }), "got: {err}");
        assert!(err.is_invalid_field());
    }

    #[test]
    fn test_decode_field_rejects_invalid_shape_with_tree() {
        let hasher = HashAlgorithm::Sha256;
        let text = encode_field(&note(), "f", "s", &hasher).replace(" data-uuid=\"b7a2\"\n", "");
        match decode_field("Front", &text, &hasher) {
            Err(AutoankiError::InvalidFieldShape { field_name, tree, reason, .. }) => {
                assert_eq!(field_name, "Front");
                assert!(tree.contains("autoanki-metadata"));
                assert!(reason.to_string().contains("data-uuid"));
            }
            other => panic!("expected InvalidFieldShape, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_field_rejects_plain_host_text() {
        let err = decode_field("Front", "just a plain note", &HashAlgorithm::Sha256).unwrap_err();
        assert!(matches!(err, AutoankiError::InvalidFieldShape { .. }));
    }

    #[test]
    fn test_files_of_kind_skips_unknown_and_generic() {
        let markers = vec![
            MediaMarker { data: "a.css".into(), media_type: Some("text/css".into()) },
            MediaMarker { data: "b.png".into(), media_type: None },
            MediaMarker { data: "c.txt".into(), media_type: Some("text/plain".into()) },
            MediaMarker { data: "d.js".into(), media_type: Some("application/javascript".into()) },
        ];
        assert_eq!(files_of_kind(&markers, MediaKind::Style), vec!["a.css"]);
        assert_eq!(files_of_kind(&markers, MediaKind::Script), vec!["d.js"]);
        assert!(files_of_kind(&markers, MediaKind::Generic).is_empty());
    }
}
