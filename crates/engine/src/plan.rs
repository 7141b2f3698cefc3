//! Step plan of a simulated hardsub run.
//!
//! The plan is derived once, when a run starts, from the selections at
//! that moment. Later selection changes do not affect a run in flight.

use hardsub_model::{output_file_name, SelectionStore};

/// Encoder settings quoted in the filterchain step.
const FILTERCHAIN_STEP: &str = "Generating hardsub filterchain (libx264/preset:medium)";

/// Ordered step descriptions plus the derived output name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPlan {
    pub steps: Vec<String>,
    pub output_name: String,
}

impl StepPlan {
    pub fn from_selection(selection: &SelectionStore) -> Self {
        let video = &selection.video.display_name;
        let subtitles = &selection.subtitles.display_name;

        let thumbnail_step = if selection.has_thumbnail() {
            format!(
                "Applying logo filter [overlay={}]",
                selection.position.overlay_expr()
            )
        } else {
            "Skipping thumbnail overlay".to_string()
        };

        let steps = vec![
            format!("Parsing input video: {video}"),
            format!("Validating ASS script markers: {subtitles}"),
            thumbnail_step,
            FILTERCHAIN_STEP.to_string(),
            "Processing frame data...".to_string(),
            "Encoding audio stream (copying original stream)".to_string(),
            "Muxing MP4 container...".to_string(),
        ];

        Self {
            steps,
            output_name: output_file_name(video),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
