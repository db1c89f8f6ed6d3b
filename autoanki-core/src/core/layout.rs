//! Tag and attribute names of the field layout, and the region padding rule.
//!
//! ```text
//! <autoanki-source hidden>
//! {escaped source content}
//! </autoanki-source>
//!
//! <autoanki-metadata
//!  data-uuid="..."
//!  data-note-type="..."
//!  data-tags="..."
//!  data-source-hash="..."
//!  data-final-hash="...">
//! {media markers}
//! </autoanki-metadata>
//!
//! <autoanki-final contenteditable="false">
//! {final content}
//! </autoanki-final>
//! ```

pub const SOURCE_TAG: &str = "autoanki-source";
pub const METADATA_TAG: &str = "autoanki-metadata";
pub const FINAL_TAG: &str = "autoanki-final";

/// Resource declaration marker inside the metadata region.
pub const RESOURCE_TAG: &str = "object";
/// Stylesheet import marker inside the metadata region.
pub const STYLE_IMPORT_TAG: &str = "style";

pub const ATTR_HIDDEN: &str = "hidden";
pub const ATTR_CONTENTEDITABLE: &str = "contenteditable";
pub const ATTR_UUID: &str = "data-uuid";
pub const ATTR_NOTE_TYPE: &str = "data-note-type";
pub const ATTR_TAGS: &str = "data-tags";
pub const ATTR_SOURCE_HASH: &str = "data-source-hash";
pub const ATTR_FINAL_HASH: &str = "data-final-hash";
pub const ATTR_DATA: &str = "data";
pub const ATTR_TYPE: &str = "type";

/// Separator between the three regions.
pub const REGION_SEPARATOR: &str = "\n\n";

/// Exactly one of these is written before and after every region body.
///
/// [`pad_region`] and [`strip_padding`] are the two halves of this rule;
/// change them together or not at all.
pub const REGION_PADDING: char = '\n';

/// Wraps `body` in one [`REGION_PADDING`] character on each side.
pub fn pad_region(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 2);
    out.push(REGION_PADDING);
    out.push_str(body);
    out.push(REGION_PADDING);
    out
}

/// Removes exactly one character from each end of `text`.
///
/// The removed characters are not inspected: a region body whose padding
/// was altered by the host still loses one character per side. Text shorter
/// than two characters strips to the empty string.
pub fn strip_padding(text: &str) -> &str {
    let mut chars = text.chars();
    if chars.next().is_none() || chars.next_back().is_none() {
        return "";
    }
    chars.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_is_symmetric_for_varied_content() {
        let samples = [
            "",
            "x",
            "\n",
            "\n\nleading and trailing\n\n",
            "  spaced  ",
            "multi\nline\ncontent",
            "日本語",
            "<b>markup</b>",
        ];
        for sample in samples {
            assert_eq!(strip_padding(&pad_region(sample)), sample, "sample {sample:?}");
        }
    }

    #[test]
    fn test_strip_padding_short_input() {
        assert_eq!(strip_padding(""), "");
        assert_eq!(strip_padding("a"), "");
        assert_eq!(strip_padding("ab"), "");
        assert_eq!(strip_padding("abc"), "b");
    }

    #[test]
    fn test_strip_padding_counts_chars_not_bytes() {
        assert_eq!(strip_padding("★x★"), "x");
    }
}
