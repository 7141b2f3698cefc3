//! File selections and thumbnail placement chosen by the user.
//!
//! The store holds three independent slots (video, subtitles, thumbnail)
//! plus the thumbnail position. A slot is replaced wholesale on every pick
//! and never merged field-by-field.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::position::ThumbnailPosition;

/// Opaque reference to a user-picked file. Its content is never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    /// Where the file lives.
    pub path: PathBuf,

    /// File name shown to the user.
    pub name: String,
}

impl FileHandle {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Build a handle whose name is the final path component.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(path, name)
    }
}

/// The three file slots of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Video,
    Subtitles,
    Thumbnail,
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "avif", "svg"];

impl SlotKind {
    pub const ALL: [SlotKind; 3] = [SlotKind::Video, SlotKind::Subtitles, SlotKind::Thumbnail];

    /// Label shown while the slot is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            SlotKind::Video => "No Video Selected",
            SlotKind::Subtitles => "No Subtitles Selected",
            SlotKind::Thumbnail => "None",
        }
    }

    /// Whether a file must be picked before a run can start.
    pub fn is_required(self) -> bool {
        !matches!(self, SlotKind::Thumbnail)
    }

    /// Picker accept filter, in HTML `accept` notation.
    pub fn accept_filter(self) -> &'static str {
        match self {
            SlotKind::Video => ".mp4,.mkv,video/mp4,video/x-matroska",
            SlotKind::Subtitles => ".ass",
            SlotKind::Thumbnail => "image/*",
        }
    }

    /// Advisory extension check against the accept filter.
    ///
    /// A `false` result is only ever reported, never enforced.
    pub fn accepts(self, file_name: &str) -> bool {
        let ext = match file_name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return false,
        };
        match self {
            SlotKind::Video => matches!(ext.as_str(), "mp4" | "mkv"),
            SlotKind::Subtitles => ext == "ass",
            SlotKind::Thumbnail => IMAGE_EXTENSIONS.contains(&ext.as_str()),
        }
    }
}

/// A slot's content: the picked file (if any) and its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSelection {
    pub file: Option<FileHandle>,
    pub display_name: String,
}

impl FileSelection {
    /// Empty selection showing the slot's placeholder.
    pub fn empty(kind: SlotKind) -> Self {
        Self {
            file: None,
            display_name: kind.placeholder().to_string(),
        }
    }

    /// Selection holding `file`, labelled with its name.
    pub fn picked(file: FileHandle) -> Self {
        Self {
            display_name: file.name.clone(),
            file: Some(file),
        }
    }

    pub fn is_selected(&self) -> bool {
        self.file.is_some()
    }
}

/// All user choices that feed a hardsub run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionStore {
    pub video: FileSelection,
    pub subtitles: FileSelection,
    pub thumbnail: FileSelection,
    pub position: ThumbnailPosition,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self {
            video: FileSelection::empty(SlotKind::Video),
            subtitles: FileSelection::empty(SlotKind::Subtitles),
            thumbnail: FileSelection::empty(SlotKind::Thumbnail),
            position: ThumbnailPosition::default(),
        }
    }
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a slot.
    pub fn slot(&self, kind: SlotKind) -> &FileSelection {
        match kind {
            SlotKind::Video => &self.video,
            SlotKind::Subtitles => &self.subtitles,
            SlotKind::Thumbnail => &self.thumbnail,
        }
    }

    fn slot_mut(&mut self, kind: SlotKind) -> &mut FileSelection {
        match kind {
            SlotKind::Video => &mut self.video,
            SlotKind::Subtitles => &mut self.subtitles,
            SlotKind::Thumbnail => &mut self.thumbnail,
        }
    }

    /// Replace a slot with a freshly picked file.
    ///
    /// `None` models a cancelled picker and leaves the slot untouched.
    /// Returns whether the slot changed.
    pub fn select_file(&mut self, kind: SlotKind, file: Option<FileHandle>) -> bool {
        let Some(file) = file else {
            return false;
        };

        if !kind.accepts(&file.name) {
            tracing::warn!(
                slot = ?kind,
                file = %file.name,
                accept = kind.accept_filter(),
                "Selected file does not match the picker filter"
            );
        }

        tracing::debug!(slot = ?kind, file = %file.name, "File selected");
        *self.slot_mut(kind) = FileSelection::picked(file);
        true
    }

    /// Replace the thumbnail position.
    pub fn set_position(&mut self, position: ThumbnailPosition) {
        self.position = position;
    }

    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail.is_selected()
    }

    /// Required slots that are still empty.
    pub fn missing_required(&self) -> Vec<SlotKind> {
        SlotKind::ALL
            .into_iter()
            .filter(|kind| kind.is_required() && !self.slot(*kind).is_selected())
            .collect()
    }

    /// Whether a run may start.
    pub fn is_ready(&self) -> bool {
        self.missing_required().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_shows_placeholders() {
        let store = SelectionStore::new();
        assert_eq!(store.video.display_name, "No Video Selected");
        assert_eq!(store.subtitles.display_name, "No Subtitles Selected");
        assert_eq!(store.thumbnail.display_name, "None");
        assert_eq!(store.position, ThumbnailPosition::TopRight);
        assert!(!store.is_ready());
    }

    #[test]
    fn test_select_file_replaces_slot() {
        let mut store = SelectionStore::new();
        assert!(store.select_file(
            SlotKind::Video,
            Some(FileHandle::from_path("/media/ep01.mkv"))
        ));
        assert_eq!(store.video.display_name, "ep01.mkv");

        store.select_file(SlotKind::Video, Some(FileHandle::from_path("/media/ep02.mp4")));
        assert_eq!(store.video.display_name, "ep02.mp4");
        assert_eq!(
            store.video.file.as_ref().unwrap().path,
            PathBuf::from("/media/ep02.mp4")
        );
    }

    #[test]
    fn test_cancelled_pick_leaves_slot_unchanged() {
        let mut store = SelectionStore::new();
        store.select_file(SlotKind::Subtitles, Some(FileHandle::from_path("ep01.ass")));
        let before = store.clone();

        assert!(!store.select_file(SlotKind::Subtitles, None));
        assert_eq!(store, before);
    }

    #[test]
    fn test_filter_mismatch_is_advisory() {
        let mut store = SelectionStore::new();
        assert!(!SlotKind::Subtitles.accepts("ep01.srt"));
        assert!(store.select_file(SlotKind::Subtitles, Some(FileHandle::from_path("ep01.srt"))));
        assert_eq!(store.subtitles.display_name, "ep01.srt");
    }

    #[test]
    fn test_accept_filters() {
        assert!(SlotKind::Video.accepts("a.MKV"));
        assert!(SlotKind::Video.accepts("a.mp4"));
        assert!(!SlotKind::Video.accepts("a.avi"));
        assert!(SlotKind::Thumbnail.accepts("logo.png"));
        assert!(!SlotKind::Thumbnail.accepts("logo"));
    }

    #[test]
    fn test_missing_required_ignores_thumbnail() {
        let mut store = SelectionStore::new();
        assert_eq!(
            store.missing_required(),
            vec![SlotKind::Video, SlotKind::Subtitles]
        );

        store.select_file(SlotKind::Video, Some(FileHandle::from_path("v.mp4")));
        assert_eq!(store.missing_required(), vec![SlotKind::Subtitles]);

        store.select_file(SlotKind::Subtitles, Some(FileHandle::from_path("s.ass")));
        assert!(store.is_ready());
        assert!(!store.has_thumbnail());
    }

    #[test]
    fn test_only_thumbnail_is_optional() {
        let required: Vec<SlotKind> = SlotKind::ALL
            .into_iter()
            .filter(|kind| kind.is_required())
            .collect();
        assert_eq!(required, vec![SlotKind::Video, SlotKind::Subtitles]);

        let mut store = SelectionStore::new();
        store.select_file(SlotKind::Thumbnail, Some(FileHandle::from_path("logo.png")));
        assert_eq!(
            store.missing_required(),
            vec![SlotKind::Video, SlotKind::Subtitles]
        );
    }

    #[test]
    fn test_set_position() {
        let mut store = SelectionStore::new();
        store.set_position(ThumbnailPosition::BottomLeft);
        assert_eq!(store.position, ThumbnailPosition::BottomLeft);
    }
}
