// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::utils::path::is_remote_url;
use crate::utils::time::{format_clock, format_seconds};

#[cfg(test)]
mod tests;

/// Time specification parsed from the command line - seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Parse time string: seconds (`90.5`), `MM:SS.ms` or `HH:MM:SS.ms`
    pub fn parse(time_str: &str) -> Result<Self, DomainError> {
        let trimmed = time_str.trim();

        if let Ok(seconds) = trimmed.parse::<f64>() {
            if !seconds.is_finite() {
                return Err(DomainError::BadArgs(format!("Time must be finite: {}", trimmed)));
            }
            if seconds < 0.0 {
                return Err(DomainError::BadArgs("Time cannot be negative".to_string()));
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        let (hours, minutes, seconds) = match parts.as_slice() {
            [m, s] => (0, Self::parse_field(m, "minutes")?, Self::parse_seconds(s)?),
            [h, m, s] => {
                let minutes = Self::parse_field(m, "minutes")?;
                if minutes >= 60 {
                    return Err(DomainError::BadArgs("Minutes must be less than 60".to_string()));
                }
                (Self::parse_field(h, "hours")?, minutes, Self::parse_seconds(s)?)
            }
            _ => {
                return Err(DomainError::BadArgs(format!(
                    "Invalid time format '{}'. Supported formats: seconds (e.g., 123.45), MM:SS.ms (e.g., 2:30.5), HH:MM:SS.ms (e.g., 1:02:30.5)",
                    trimmed
                )))
            }
        };

        Ok(Self::from_seconds(
            hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds,
        ))
    }

    fn parse_field(value: &str, name: &str) -> Result<u32, DomainError> {
        value
            .parse::<u32>()
            .map_err(|_| DomainError::BadArgs(format!("Invalid {} format: '{}'", name, value)))
    }

    fn parse_seconds(value: &str) -> Result<f64, DomainError> {
        let seconds = value
            .parse::<f64>()
            .map_err(|_| DomainError::BadArgs(format!("Invalid seconds format: '{}'", value)))?;
        if !(0.0..60.0).contains(&seconds) {
            return Err(DomainError::BadArgs("Seconds must be less than 60".to_string()));
        }
        Ok(seconds)
    }
}

impl FromStr for TimeSpec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_clock(self.seconds))
    }
}

/// Total duration of a source in seconds, as reported by the probe
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct MediaDuration(f64);

impl MediaDuration {
    /// Validate a probed duration
    pub fn new(seconds: f64) -> Result<Self, DomainError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(DomainError::Probe(format!(
                "Duration must be a non-negative number of seconds, got {}",
                seconds
            )));
        }
        Ok(Self(seconds))
    }

    pub fn seconds(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for MediaDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

/// User-requested sub-range of the source; unset bounds mean source start/end
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeWindow {
    pub start: Option<f64>,
    pub end: Option<f64>,
}

impl TimeWindow {
    pub fn new(start: Option<f64>, end: Option<f64>) -> Self {
        Self { start, end }
    }

    /// Window covering the whole source
    pub fn unbounded() -> Self {
        Self::default()
    }
}

/// Portion of the source timeline subject to segmentation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveRegion {
    pub offset: f64,
    pub length: f64,
}

impl EffectiveRegion {
    pub fn end(&self) -> f64 {
        self.offset + self.length
    }

    /// The window that selects exactly this region
    pub fn as_window(&self) -> TimeWindow {
        TimeWindow::new(Some(self.offset), Some(self.end()))
    }
}

/// One planned clip: 1-based index plus its `[start, end)` bounds in source time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentDescriptor {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

impl SegmentDescriptor {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for SegmentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} [{:.3}, {:.3})", self.index, self.start, self.end)
    }
}

/// Stream type reported by the probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
    Subtitle,
    Other,
}

impl StreamKind {
    pub fn from_codec_type(codec_type: &str) -> Self {
        match codec_type {
            "video" => StreamKind::Video,
            "audio" => StreamKind::Audio,
            "subtitle" => StreamKind::Subtitle,
            _ => StreamKind::Other,
        }
    }
}

/// Per-stream metadata returned alongside the duration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamInfo {
    pub index: usize,
    pub kind: StreamKind,
    pub codec: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Complete probe result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaInfo {
    pub duration: MediaDuration,
    pub streams: Vec<StreamInfo>,
}

impl MediaInfo {
    pub fn new(duration: MediaDuration, streams: Vec<StreamInfo>) -> Self {
        Self { duration, streams }
    }

    /// Width and height of the first video stream that reports both
    pub fn video_dimensions(&self) -> Option<(u32, u32)> {
        self.streams
            .iter()
            .filter(|s| s.kind == StreamKind::Video)
            .find_map(|s| match (s.width, s.height) {
                (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
                _ => None,
            })
    }
}

/// Transcoding mode applied to every planned segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClipMode {
    /// Remux without re-encoding
    CopyStreams,
    /// Drop video, encode audio only
    AudioOnly,
    /// Center-crop to 9:16 and scale for vertical short-form video
    CropScale,
    /// Trim, reset timestamps and burn in highlight text
    OverlayHighlight,
    /// Join existing clips into one file without re-encoding
    Merge,
    /// Grab a single scaled-down frame as a JPEG preview
    Thumbnail,
}

impl ClipMode {
    /// Container extension for outputs of this mode
    pub fn extension(&self) -> &'static str {
        match self {
            ClipMode::AudioOnly => "mp3",
            ClipMode::Thumbnail => "jpg",
            _ => "mp4",
        }
    }
}

impl fmt::Display for ClipMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClipMode::CopyStreams => "copy-streams",
            ClipMode::AudioOnly => "re-encode-audio-only",
            ClipMode::CropScale => "crop-scale-video",
            ClipMode::OverlayHighlight => "overlay-highlight",
            ClipMode::Merge => "merge-clips",
            ClipMode::Thumbnail => "thumbnail",
        };
        f.write_str(name)
    }
}

/// Extra inputs some modes need
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipFlags {
    /// Text to burn in for overlay-highlight
    pub overlay_text: Option<String>,
    /// Source (width, height) for crop-scale
    pub video_dimensions: Option<(u32, u32)>,
}

impl ClipFlags {
    pub fn with_overlay_text(mut self, text: impl Into<String>) -> Self {
        self.overlay_text = Some(text.into());
        self
    }

    pub fn with_video_dimensions(mut self, dimensions: Option<(u32, u32)>) -> Self {
        self.video_dimensions = dimensions;
        self
    }
}

/// Fixed audio encoding parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioProfile {
    pub codec: String,
    pub sample_rate: u32,
    pub bitrate: String,
}

impl Default for AudioProfile {
    fn default() -> Self {
        Self {
            codec: "libmp3lame".to_string(),
            sample_rate: 44100,
            bitrate: "192k".to_string(),
        }
    }
}

/// Fixed video re-encode parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoProfile {
    pub codec: String,
    pub preset: String,
    pub crf: u8,
    /// Target size for crop-scale output
    pub vertical_width: u32,
    pub vertical_height: u32,
}

impl Default for VideoProfile {
    fn default() -> Self {
        Self {
            codec: "libx264".to_string(),
            preset: "fast".to_string(),
            crf: 23,
            vertical_width: 1080,
            vertical_height: 1920,
        }
    }
}

/// On-screen text style for highlights; x/y are drawtext expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayProfile {
    pub font_size: u32,
    pub font_color: String,
    pub x: String,
    pub y: String,
}

impl Default for OverlayProfile {
    fn default() -> Self {
        Self {
            font_size: 48,
            font_color: "white".to_string(),
            x: "(w-text_w)/2".to_string(),
            y: "h-text_h-80".to_string(),
        }
    }
}

/// All fixed codec parameters used by the clip builder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodingProfile {
    pub audio: AudioProfile,
    pub video: VideoProfile,
    pub overlay: OverlayProfile,
}

/// Pixel rectangle cut out of the source frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropGeometry {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

/// Concrete work the transcoding engine performs for one clip
#[derive(Debug, Clone, PartialEq)]
pub enum TranscodeOperation {
    /// Copy all tracks and blank the listed metadata tags
    StreamCopy { blank_tags: Vec<&'static str> },
    /// Drop video and encode audio
    AudioExtract(AudioProfile),
    /// Crop, scale and re-encode video
    CropScale {
        crop: CropGeometry,
        target: (u32, u32),
        video: VideoProfile,
    },
    /// Trim by filter, reset timestamps and draw text
    OverlayHighlight {
        start: f64,
        end: f64,
        text: String,
        overlay: OverlayProfile,
        video: VideoProfile,
    },
    /// Stream-copy every file named in a concat list into one output
    Concat,
    /// Single frame scaled to `height`, width following the aspect ratio
    Thumbnail { height: u32 },
}

impl TranscodeOperation {
    pub fn mode(&self) -> ClipMode {
        match self {
            TranscodeOperation::StreamCopy { .. } => ClipMode::CopyStreams,
            TranscodeOperation::AudioExtract(_) => ClipMode::AudioOnly,
            TranscodeOperation::CropScale { .. } => ClipMode::CropScale,
            TranscodeOperation::OverlayHighlight { .. } => ClipMode::OverlayHighlight,
            TranscodeOperation::Concat => ClipMode::Merge,
            TranscodeOperation::Thumbnail { .. } => ClipMode::Thumbnail,
        }
    }

    /// Video filter chain, if the operation needs one
    pub fn video_filter(&self) -> Option<String> {
        match self {
            TranscodeOperation::CropScale { crop, target, .. } => Some(format!(
                "crop={}:{}:{}:{},scale={}:{}",
                crop.width, crop.height, crop.x, crop.y, target.0, target.1
            )),
            TranscodeOperation::OverlayHighlight {
                start,
                end,
                text,
                overlay,
                ..
            } => Some(format!(
                "trim=start={}:end={},setpts=PTS-STARTPTS,drawtext=text='{}':expansion=none:fontsize={}:fontcolor={}:x={}:y={}",
                format_seconds(*start),
                format_seconds(*end),
                escape_drawtext(text),
                overlay.font_size,
                overlay.font_color,
                overlay.x,
                overlay.y
            )),
            TranscodeOperation::Thumbnail { height } => Some(format!("scale=-1:{}", height)),
            _ => None,
        }
    }

    /// Audio filter chain, if the operation needs one
    pub fn audio_filter(&self) -> Option<String> {
        match self {
            TranscodeOperation::OverlayHighlight { start, end, .. } => Some(format!(
                "atrim=start={}:end={},asetpts=PTS-STARTPTS",
                format_seconds(*start),
                format_seconds(*end)
            )),
            _ => None,
        }
    }
}

/// Escape text for a single-quoted drawtext value.
///
/// The filtergraph parser strips the quotes and the option parser consumes one
/// level of backslashes; `expansion=none` keeps `%` literal after that.
pub fn escape_drawtext(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | ':' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\'' => escaped.push_str("\u{2019}"),
            '\n' | '\r' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Fully specified transcoding request for one output file
#[derive(Debug, Clone, PartialEq)]
pub struct ClipSpec {
    source: PathBuf,
    output: PathBuf,
    trim_start: f64,
    trim_duration: Option<f64>,
    operation: TranscodeOperation,
}

impl ClipSpec {
    pub(crate) fn new(
        source: PathBuf,
        output: PathBuf,
        trim_start: f64,
        trim_duration: Option<f64>,
        operation: TranscodeOperation,
    ) -> Self {
        Self {
            source,
            output,
            trim_start,
            trim_duration,
            operation,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn trim_start(&self) -> f64 {
        self.trim_start
    }

    /// `None` means "to the end of the input"
    pub fn trim_duration(&self) -> Option<f64> {
        self.trim_duration
    }

    pub fn operation(&self) -> &TranscodeOperation {
        &self.operation
    }

    pub fn mode(&self) -> ClipMode {
        self.operation.mode()
    }
}

/// Where the input media comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ClipSource {
    Local(PathBuf),
    /// `http(s)://` address fetched before processing
    Remote(String),
}

impl ClipSource {
    pub fn parse(input: &str) -> Self {
        if is_remote_url(input) {
            ClipSource::Remote(input.trim().to_string())
        } else {
            ClipSource::Local(PathBuf::from(input))
        }
    }
}

impl fmt::Display for ClipSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipSource::Local(path) => write!(f, "{}", path.display()),
            ClipSource::Remote(url) => f.write_str(url),
        }
    }
}

/// Per-run options shared by single-file and batch splitting
#[derive(Debug, Clone, PartialEq)]
pub struct ClipSettings {
    pub clip_duration: f64,
    pub window: TimeWindow,
    pub mode: ClipMode,
    /// Extract one continuous audio file instead of per-segment clips
    pub full_audio: bool,
    /// Write a `.jpg` preview next to every clip
    pub thumbnails: bool,
}

impl ClipSettings {
    pub fn new(clip_duration: f64, mode: ClipMode) -> Self {
        Self {
            clip_duration,
            window: TimeWindow::unbounded(),
            mode,
            full_audio: false,
            thumbnails: false,
        }
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_full_audio(mut self, full_audio: bool) -> Self {
        self.full_audio = full_audio;
        self
    }

    pub fn with_thumbnails(mut self, thumbnails: bool) -> Self {
        self.thumbnails = thumbnails;
        self
    }

    /// Reject flag combinations no pipeline can serve
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.full_audio && self.mode != ClipMode::AudioOnly {
            return Err(DomainError::BadArgs(
                "Full-audio extraction requires audio-only mode".to_string(),
            ));
        }
        if self.mode == ClipMode::OverlayHighlight {
            return Err(DomainError::BadArgs(
                "Overlay highlights are produced from a transcript, not by splitting".to_string(),
            ));
        }
        if matches!(self.mode, ClipMode::Merge | ClipMode::Thumbnail) {
            return Err(DomainError::BadArgs(format!(
                "{} is not a splitting mode",
                self.mode
            )));
        }
        if self.thumbnails && self.mode == ClipMode::AudioOnly {
            return Err(DomainError::BadArgs(
                "Thumbnails need video clips, not audio-only output".to_string(),
            ));
        }
        Ok(())
    }
}

/// Timed text produced by transcription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Files produced by one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipOutcome {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub outputs: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub thumbnails: Vec<PathBuf>,
}

impl ClipOutcome {
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            outputs: Vec::new(),
            thumbnails: Vec::new(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// One file that failed in a collect-and-continue batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedFile {
    pub source: PathBuf,
    pub error: String,
}

/// Result of a batch run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub completed: Vec<ClipOutcome>,
    pub failed: Vec<FailedFile>,
}

impl BatchReport {
    pub fn total_outputs(&self) -> usize {
        self.completed.iter().map(|c| c.outputs.len()).sum()
    }
}
