//! Path helpers for media discovery and output layout

use std::path::{Path, PathBuf};

/// Extensions treated as video input in batch mode (compared lowercase)
pub const VIDEO_EXTENSIONS: [&str; 7] = ["mp4", "avi", "mov", "mkv", "wmv", "flv", "webm"];

/// Whether the path carries a known video extension, ignoring case
pub fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// File name without its extension
pub fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
}

/// `<dir>/<stem>.json` next to a media file
pub fn sidecar_transcript(path: &Path) -> PathBuf {
    path.with_extension("json")
}

/// Inputs fetched over the network instead of read from disk
pub fn is_remote_url(input: &str) -> bool {
    let lower = input.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Sort key that orders `clip_2` before `clip_10`: the stem split into its
/// text prefix and trailing number, then the full name as a tiebreak
pub fn natural_order_key(path: &Path) -> (String, u64, String) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = file_stem(path).unwrap_or_default();
    let prefix = stem.trim_end_matches(|c: char| c.is_ascii_digit());
    let number = stem[prefix.len()..].parse::<u64>().unwrap_or(0);
    (prefix.to_string(), number, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_video_extension_is_case_insensitive() {
        assert!(has_video_extension(Path::new("a/movie.mp4")));
        assert!(has_video_extension(Path::new("MOVIE.MKV")));
        assert!(has_video_extension(Path::new("clip.WebM")));
        assert!(!has_video_extension(Path::new("notes.txt")));
        assert!(!has_video_extension(Path::new("noext")));
        assert!(!has_video_extension(Path::new("song.mp3")));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("dir/talk.final.mov")), Some("talk.final".to_string()));
        assert_eq!(file_stem(Path::new("dir/")), Some("dir".to_string()));
        assert_eq!(file_stem(Path::new("")), None);
    }

    #[test]
    fn test_sidecar_transcript() {
        assert_eq!(
            sidecar_transcript(Path::new("videos/talk.mp4")),
            PathBuf::from("videos/talk.json")
        );
    }

    #[test]
    fn test_is_remote_url() {
        assert!(is_remote_url("https://www.youtube.com/watch?v=abc"));
        assert!(is_remote_url("HTTP://example.com/v.mp4"));
        assert!(!is_remote_url("videos/http.mp4"));
        assert!(!is_remote_url("C:\\videos\\a.mp4"));
    }

    #[test]
    fn test_natural_order_key() {
        let mut names = vec!["clip_10.mp4", "clip_2.mp4", "b.mp4", "clip_1.mkv", "a.mp4"];
        names.sort_by_key(|n| natural_order_key(Path::new(n)));
        assert_eq!(names, vec!["a.mp4", "b.mp4", "clip_1.mkv", "clip_2.mp4", "clip_10.mp4"]);
    }
}
