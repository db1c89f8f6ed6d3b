//! Inert media markers that make the host's dependency resolver find a note's files.
//!
//! Markers render nothing visible. Stylesheets get both a resource declaration
//! and an `@import`: the import applies the stylesheet while the field is on
//! screen and is retracted with it when the field's markup is removed.

use super::escape::escape_html;
use super::layout::{ATTR_DATA, ATTR_TYPE, RESOURCE_TAG, STYLE_IMPORT_TAG};
use super::note::{MediaKind, Note};

/// Renders every media marker for `note`: styles (declaration + import), then
/// scripts, then generic media, each in input order.
pub fn media_markers(note: &Note) -> String {
    let mut out = String::new();
    for (kind, media) in note.media_refs() {
        out.push_str(&resource_marker(&media.stored_filename, kind.media_type()));
        if kind == MediaKind::Style {
            out.push_str(&style_import_marker(&media.stored_filename));
        }
    }
    out
}

/// `<object data="..." type="..."></object>`; `type` is omitted for generic media.
fn resource_marker(stored_filename: &str, media_type: Option<&str>) -> String {
    let type_attr = media_type
        .map(|t| format!(" {ATTR_TYPE}=\"{}\"", escape_html(t)))
        .unwrap_or_default();
    format!(
        "<{RESOURCE_TAG} {ATTR_DATA}=\"{}\"{type_attr}></{RESOURCE_TAG}>",
        escape_html(stored_filename)
    )
}

fn style_import_marker(stored_filename: &str) -> String {
    format!(
        "<{STYLE_IMPORT_TAG}>@import url(\"{}\");</{STYLE_IMPORT_TAG}>",
        urlencoding::encode(stored_filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::note::MediaRef;

    #[test]
    fn test_empty_note_has_no_markers() {
        assert_eq!(media_markers(&Note::default()), "");
    }

    #[test]
    fn test_style_file_gets_declaration_then_import() {
        let note = Note {
            style_files: vec![MediaRef::new("_my style.css")],
            ..Note::default()
        };
        assert_eq!(
            media_markers(&note),
            "<object data=\"_my style.css\" type=\"text/css\"></object>\
             <style>@import url(\"_my%20style.css\");</style>"
        );
    }

    #[test]
    fn test_marker_order_follows_kind_then_list_order() {
        let note = Note {
            style_files: vec![MediaRef::new("s1.css"), MediaRef::new("s2.css")],
            script_files: vec![MediaRef::new("j1.js")],
            media_files: vec![MediaRef::new("m1.png")],
            ..Note::default()
        };
        let markers = media_markers(&note);
        let positions: Vec<usize> = ["s1.css\" type", "s2.css\" type", "j1.js", "m1.png"]
            .iter()
            .map(|needle| markers.find(needle).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "got: {markers}");
        assert!(markers.contains("<object data=\"j1.js\" type=\"application/javascript\"></object>"));
        assert!(markers.ends_with("<object data=\"m1.png\"></object>"));
        assert_eq!(markers.matches("<style>").count(), 2);
    }

    #[test]
    fn test_filenames_are_escaped_in_attributes() {
        let note = Note {
            media_files: vec![MediaRef::new("a\"b<c>.png")],
            ..Note::default()
        };
        assert_eq!(
            media_markers(&note),
            "<object data=\"a&quot;b&lt;c&gt;.png\"></object>"
        );
    }
}
