//! Internal domain modules for the Autoanki core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod escape;
pub mod field;
pub mod hash;
pub mod layout;
pub mod markup;
pub mod media;
pub mod note;
pub mod settings;
pub mod shape;

#[doc(inline)]
pub use codec::FieldCodec;
#[doc(inline)]
pub use decoder::decode_field;
#[doc(inline)]
pub use encoder::encode_field;
#[doc(inline)]
pub use error::{AutoankiError, Result};
#[doc(inline)]
pub use escape::{escape_html, unescape_html};
#[doc(inline)]
pub use field::{has_content_changed, DecodedField, FieldMetadata};
#[doc(inline)]
pub use hash::{hash_content, ContentHasher, HashAlgorithm};
#[doc(inline)]
pub use markup::{Document, Element, MarkupParser, Node, ParseError};
#[doc(inline)]
pub use media::media_markers;
#[doc(inline)]
pub use note::{MediaKind, MediaRef, Note};
#[doc(inline)]
pub use settings::{load_settings, save_settings, CodecSettings};
#[doc(inline)]
pub use shape::{validate_field, FieldLayout, ShapeError, ShapeViolation};
