//! Thumbnail placement and its overlay coordinate expression.

use std::fmt;
use std::str::FromStr;

use hardsub_common::error::HardsubError;
use serde::{Deserialize, Serialize};

/// Corner placement for the thumbnail overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThumbnailPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ThumbnailPosition {
    /// Every position, in picker order.
    pub const ALL: [ThumbnailPosition; 4] = [
        ThumbnailPosition::TopLeft,
        ThumbnailPosition::TopRight,
        ThumbnailPosition::BottomLeft,
        ThumbnailPosition::BottomRight,
    ];

    /// Human-readable label, as shown in the position picker.
    pub fn label(self) -> &'static str {
        match self {
            ThumbnailPosition::TopLeft => "Top Left",
            ThumbnailPosition::TopRight => "Top Right",
            ThumbnailPosition::BottomLeft => "Bottom Left",
            ThumbnailPosition::BottomRight => "Bottom Right",
        }
    }

    /// Short machine name (`top-left`, ...), used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            ThumbnailPosition::TopLeft => "top-left",
            ThumbnailPosition::TopRight => "top-right",
            ThumbnailPosition::BottomLeft => "bottom-left",
            ThumbnailPosition::BottomRight => "bottom-right",
        }
    }

    /// FFmpeg `overlay=` coordinate expression with a 10 px margin.
    pub fn overlay_expr(self) -> &'static str {
        match self {
            ThumbnailPosition::TopLeft => "10:10",
            ThumbnailPosition::TopRight => "main_w-overlay_w-10:10",
            ThumbnailPosition::BottomLeft => "10:main_h-overlay_h-10",
            ThumbnailPosition::BottomRight => "main_w-overlay_w-10:main_h-overlay_h-10",
        }
    }
}

impl fmt::Display for ThumbnailPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ThumbnailPosition {
    type Err = HardsubError;

    /// Accepts labels (`Top Left`) and slugs (`top-left`, `top_left`), any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '_' => '-',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        Self::ALL
            .into_iter()
            .find(|p| p.slug() == normalized)
            .ok_or_else(|| {
                HardsubError::invalid_value(format!(
                    "Unknown thumbnail position: {s}. Use: top-left, top-right, bottom-left, bottom-right"
                ))
            })
    }
}
