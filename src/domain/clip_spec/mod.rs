//! Maps planned segments to fully specified transcoding requests

use std::path::{Path, PathBuf};

use crate::domain::errors::*;
use crate::domain::model::*;

/// File name used by full-audio extraction
pub const FULL_AUDIO_FILE_NAME: &str = "full_audio.mp3";

/// Output of a clip merge
pub const MERGED_FILE_NAME: &str = "merged.mp4";

/// Concat demuxer input list written next to the merged output
pub const CONCAT_LIST_FILE_NAME: &str = "filelist.txt";

/// Thumbnail height in pixels
pub const THUMBNAIL_HEIGHT: u32 = 150;

/// Preferred thumbnail position; clips shorter than twice this use their midpoint
const THUMBNAIL_SEEK_SECONDS: f64 = 1.0;

/// Metadata tags blanked when stream-copying
const BLANKED_TAGS: [&str; 3] = ["title", "comment", "artist"];

/// Builds one [`ClipSpec`] per segment from a fixed encoding profile
#[derive(Debug, Clone, Default)]
pub struct ClipSpecBuilder {
    profile: EncodingProfile,
}

impl ClipSpecBuilder {
    pub fn new(profile: EncodingProfile) -> Self {
        Self { profile }
    }

    /// Output path for a segment: `<output_dir>/clip_<index>.<ext>`
    pub fn output_path(output_dir: &Path, index: usize, mode: ClipMode) -> PathBuf {
        output_dir.join(format!("clip_{}.{}", index, mode.extension()))
    }

    /// Build the transcoding request for one segment
    pub fn build(
        &self,
        segment: &SegmentDescriptor,
        source: &Path,
        output_dir: &Path,
        mode: ClipMode,
        flags: &ClipFlags,
    ) -> DomainResult<ClipSpec> {
        if segment.index == 0 {
            return Err(DomainError::Build("Segment indices start at 1".to_string()));
        }
        if !(segment.start < segment.end) {
            return Err(DomainError::Build(format!(
                "Segment {} is empty or inverted",
                segment
            )));
        }

        let operation = match mode {
            ClipMode::CopyStreams => TranscodeOperation::StreamCopy {
                blank_tags: BLANKED_TAGS.to_vec(),
            },
            ClipMode::AudioOnly => TranscodeOperation::AudioExtract(self.profile.audio.clone()),
            ClipMode::CropScale => self.crop_scale(flags)?,
            ClipMode::OverlayHighlight => self.overlay(segment, flags)?,
            ClipMode::Merge | ClipMode::Thumbnail => {
                return Err(DomainError::Build(format!(
                    "{} does not produce per-segment clips",
                    mode
                )))
            }
        };

        Ok(ClipSpec::new(
            source.to_path_buf(),
            Self::output_path(output_dir, segment.index, mode),
            segment.start,
            Some(segment.length()),
            operation,
        ))
    }

    /// Build a single audio extraction over the whole input
    pub fn build_full_audio(&self, source: &Path, output_dir: &Path) -> ClipSpec {
        ClipSpec::new(
            source.to_path_buf(),
            output_dir.join(FULL_AUDIO_FILE_NAME),
            0.0,
            None,
            TranscodeOperation::AudioExtract(self.profile.audio.clone()),
        )
    }

    /// Join every clip named in the concat `list` into `<output_dir>/merged.mp4`
    pub fn build_merge(&self, list: &Path, output_dir: &Path) -> ClipSpec {
        ClipSpec::new(
            list.to_path_buf(),
            output_dir.join(MERGED_FILE_NAME),
            0.0,
            None,
            TranscodeOperation::Concat,
        )
    }

    /// Preview frame for a finished clip, written beside it as `.jpg`
    pub fn build_thumbnail(&self, clip: &Path, clip_length: f64) -> ClipSpec {
        let seek = THUMBNAIL_SEEK_SECONDS.min(clip_length / 2.0).max(0.0);
        ClipSpec::new(
            clip.to_path_buf(),
            clip.with_extension(ClipMode::Thumbnail.extension()),
            seek,
            None,
            TranscodeOperation::Thumbnail {
                height: THUMBNAIL_HEIGHT,
            },
        )
    }

    fn crop_scale(&self, flags: &ClipFlags) -> DomainResult<TranscodeOperation> {
        let (width, height) = flags.video_dimensions.ok_or_else(|| {
            DomainError::Build(format!(
                "{} requires the source video dimensions",
                ClipMode::CropScale
            ))
        })?;

        let crop = vertical_crop(width, height).ok_or_else(|| {
            DomainError::Build(format!(
                "Source {}x{} is too small to crop to 9:16",
                width, height
            ))
        })?;

        let video = self.profile.video.clone();
        Ok(TranscodeOperation::CropScale {
            crop,
            target: (video.vertical_width, video.vertical_height),
            video,
        })
    }

    fn overlay(
        &self,
        segment: &SegmentDescriptor,
        flags: &ClipFlags,
    ) -> DomainResult<TranscodeOperation> {
        let text = flags
            .overlay_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                DomainError::Build(format!(
                    "{} requires non-empty overlay text",
                    ClipMode::OverlayHighlight
                ))
            })?;

        Ok(TranscodeOperation::OverlayHighlight {
            start: segment.start,
            end: segment.end,
            text: text.to_string(),
            overlay: self.profile.overlay.clone(),
            video: self.profile.video.clone(),
        })
    }
}

/// Centered full-height 9:16 crop; width rounded down to even for the encoder
pub fn vertical_crop(width: u32, height: u32) -> Option<CropGeometry> {
    let ideal = (u64::from(height) * 9 / 16) as u32;
    let crop_width = ideal.min(width) & !1;
    let crop_height = height & !1;
    if crop_width == 0 || crop_height == 0 {
        return None;
    }
    Some(CropGeometry {
        width: crop_width,
        height: crop_height,
        x: (width - crop_width) / 2,
        y: (height - crop_height) / 2,
    })
}

/// Concat demuxer list: one `file '<path>'` line per clip, in order
pub fn concat_list(clips: &[PathBuf]) -> String {
    clips
        .iter()
        .map(|clip| {
            let path = clip.to_string_lossy().replace('\'', "'\\''");
            format!("file '{}'\n", path)
        })
        .collect()
}
