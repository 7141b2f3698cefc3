//! Output file naming.

/// Suffix appended to the stem of the source video.
pub const HARDSUB_SUFFIX: &str = "_hardsub.mp4";

/// Derive the output file name from the video's display name.
///
/// Only the last extension segment is stripped; a name without a dot is
/// used as-is.
pub fn output_file_name(video_name: &str) -> String {
    let stem = match video_name.rfind('.') {
        Some(idx) => &video_name[..idx],
        None => video_name,
    };
    format!("{stem}{HARDSUB_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strips_only_last_extension() {
        assert_eq!(output_file_name("clip.final.mp4"), "clip.final_hardsub.mp4");
        assert_eq!(output_file_name("episode01.mkv"), "episode01_hardsub.mp4");
    }

    #[test]
    fn test_name_without_extension() {
        assert_eq!(output_file_name("clip"), "clip_hardsub.mp4");
    }

    #[test]
    fn test_dotfile_keeps_empty_stem() {
        assert_eq!(output_file_name(".mkv"), "_hardsub.mp4");
    }

    proptest! {
        #[test]
        fn prop_output_always_ends_with_suffix(stem in "[a-zA-Z0-9 _-]{1,24}", ext in "[a-z0-9]{1,4}") {
            let name = format!("{stem}.{ext}");
            let out = output_file_name(&name);
            prop_assert_eq!(out, format!("{stem}{HARDSUB_SUFFIX}"));
        }
    }
}
