use serde::{Deserialize, Serialize};

/// Which list a media reference came from, and so how it is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaKind {
    Style,
    Script,
    /// Media consumed by plugin-authored rendering code rather than a standard embed tag.
    Generic,
}

impl MediaKind {
    /// MIME type written on the resource marker, if any.
    pub fn media_type(self) -> Option<&'static str> {
        match self {
            Self::Style => Some("text/css"),
            Self::Script => Some("application/javascript"),
            Self::Generic => None,
        }
    }

    /// Maps a marker's MIME type back to its kind. Unrecognised types map to `None`.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "text/css" => Some(Self::Style),
            "application/javascript" => Some(Self::Script),
            _ => None,
        }
    }
}

/// A media file attached to a note, addressed by its filename in the host's media store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    pub stored_filename: String,
}

impl MediaRef {
    pub fn new(stored_filename: impl Into<String>) -> Self {
        Self { stored_filename: stored_filename.into() }
    }
}

/// The note being written into a field. Supplied read-only by the note model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Must be non-empty before the note is encoded.
    pub uuid: String,
    pub model_name: String,
    pub tags: Vec<String>,
    pub style_files: Vec<MediaRef>,
    pub script_files: Vec<MediaRef>,
    pub media_files: Vec<MediaRef>,
}

impl Note {
    /// Tags joined with single spaces, as stored in the metadata region.
    pub fn joined_tags(&self) -> String {
        self.tags.join(" ")
    }

    /// All media references with their kind: styles, then scripts, then generic media,
    /// each in list order.
    pub fn media_refs(&self) -> impl Iterator<Item = (MediaKind, &MediaRef)> {
        let styles = self.style_files.iter().map(|m| (MediaKind::Style, m));
        let scripts = self.script_files.iter().map(|m| (MediaKind::Script, m));
        let generic = self.media_files.iter().map(|m| (MediaKind::Generic, m));
        styles.chain(scripts).chain(generic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note() -> Note {
        Note {
            uuid: "note-1".into(),
            model_name: "Basic".into(),
            tags: vec!["rust".into(), "ownership".into()],
            style_files: vec![MediaRef::new("a.css"), MediaRef::new("b.css")],
            script_files: vec![MediaRef::new("c.js")],
            media_files: vec![MediaRef::new("d.png")],
        }
    }

    #[test]
    fn test_joined_tags() {
        assert_eq!(note().joined_tags(), "rust ownership");
        assert_eq!(Note::default().joined_tags(), "");
    }

    #[test]
    fn test_media_refs_order_and_kinds() {
        let note = note();
        let refs: Vec<(MediaKind, &str)> = note
            .media_refs()
            .map(|(kind, m)| (kind, m.stored_filename.as_str()))
            .collect();
        assert_eq!(
            refs,
            vec![
                (MediaKind::Style, "a.css"),
                (MediaKind::Style, "b.css"),
                (MediaKind::Script, "c.js"),
                (MediaKind::Generic, "d.png"),
            ]
        );
    }

    #[test]
    fn test_media_type_round_trips_for_known_kinds() {
        for kind in [MediaKind::Style, MediaKind::Script] {
            let media_type = kind.media_type().unwrap();
            assert_eq!(MediaKind::from_media_type(media_type), Some(kind));
        }
        assert_eq!(MediaKind::Generic.media_type(), None);
        assert_eq!(MediaKind::from_media_type("image/png"), None);
    }
}
