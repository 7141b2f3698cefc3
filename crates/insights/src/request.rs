//! Insights request parameters and prompt construction.

use hardsub_model::{SelectionStore, ThumbnailPosition};
use serde::{Deserialize, Serialize};

/// What the insights service is told about a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightsRequest {
    pub video_name: String,
    pub subtitles_name: String,
    pub has_thumbnail: bool,
    pub position: ThumbnailPosition,
}

impl InsightsRequest {
    pub fn new(
        video_name: impl Into<String>,
        subtitles_name: impl Into<String>,
        has_thumbnail: bool,
        position: ThumbnailPosition,
    ) -> Self {
        Self {
            video_name: video_name.into(),
            subtitles_name: subtitles_name.into(),
            has_thumbnail,
            position,
        }
    }

    /// Snapshot the current selections.
    pub fn from_selection(selection: &SelectionStore) -> Self {
        Self::new(
            selection.video.display_name.clone(),
            selection.subtitles.display_name.clone(),
            selection.has_thumbnail(),
            selection.position,
        )
    }
}

/// Build the free-text prompt sent to the generative model.
pub fn build_prompt(request: &InsightsRequest) -> String {
    let thumbnail = if request.has_thumbnail {
        format!("Yes ({})", request.position.label())
    } else {
        "No".to_string()
    };

    format!(
        "Generate a short technical \"FFmpeg execution plan\" overview for an anime hardsubbing task.\n\
         Video: {video}\n\
         Subtitles: {subs}\n\
         Thumbnail: {thumbnail}\n\
         \n\
         Format the response as a bulleted list of 3 items explaining technical optimizations. \
         Keep it under 100 words.",
        video = request.video_name,
        subs = request.subtitles_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hardsub_model::{FileHandle, SlotKind};

    #[test]
    fn test_prompt_mentions_all_inputs() {
        let request =
            InsightsRequest::new("ep01.mkv", "ep01.ass", true, ThumbnailPosition::BottomLeft);
        let prompt = build_prompt(&request);
        assert!(prompt.contains("Video: ep01.mkv"));
        assert!(prompt.contains("Subtitles: ep01.ass"));
        assert!(prompt.contains("Thumbnail: Yes (Bottom Left)"));
        assert!(prompt.contains("3 items"));
    }

    #[test]
    fn test_prompt_without_thumbnail() {
        let request = InsightsRequest::new("v.mp4", "s.ass", false, ThumbnailPosition::TopLeft);
        assert!(build_prompt(&request).contains("Thumbnail: No\n"));
    }

    #[test]
    fn test_from_selection_uses_display_names() {
        let mut selection = SelectionStore::new();
        selection.select_file(SlotKind::Video, Some(FileHandle::from_path("/tmp/ep02.mp4")));
        selection.select_file(SlotKind::Subtitles, Some(FileHandle::from_path("/tmp/ep02.ass")));
        selection.set_position(ThumbnailPosition::TopLeft);

        let request = InsightsRequest::from_selection(&selection);
        assert_eq!(request.video_name, "ep02.mp4");
        assert_eq!(request.subtitles_name, "ep02.ass");
        assert!(!request.has_thumbnail);
        assert_eq!(request.position, ThumbnailPosition::TopLeft);
    }
}
