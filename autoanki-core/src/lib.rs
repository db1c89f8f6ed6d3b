//! Core library for Autoanki: a codec that stores a note's source content,
//! rendered content and metadata inside a single plain-text Anki field.
//!
//! The primary entry point is [`FieldCodec`]: [`FieldCodec::encode`] writes a
//! field, [`FieldCodec::decode`] reads one back and reports whether either
//! content region was edited inside Anki since it was written.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use self::core::{
    codec::FieldCodec,
    decoder::decode_field,
    encoder::encode_field,
    error::{AutoankiError, Result},
    escape::{escape_html, unescape_html},
    field::{has_content_changed, DecodedField, FieldMetadata},
    hash::{hash_content, ContentHasher, HashAlgorithm},
    layout::REGION_PADDING,
    markup::{Document, Element, MarkupParser, Node, ParseError},
    media::media_markers,
    note::{MediaKind, MediaRef, Note},
    settings::{load_settings, save_settings, CodecSettings},
    shape::{validate_field, FieldLayout, MediaMarker, ShapeError, ShapeViolation},
};
