//! FFmpeg execution adapter
//!
//! Turns a [`ClipSpec`] into an ffmpeg command line and runs it as a child
//! process, one clip at a time.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::time::format_seconds;

/// Lines of ffmpeg stderr kept in error messages
const STDERR_TAIL_LINES: usize = 20;

/// FFmpeg-based execution adapter
pub struct FfmpegAdapter {
    ffmpeg_path: PathBuf,
    timeout: Option<Duration>,
}

impl FfmpegAdapter {
    /// Create new FFmpeg adapter for the given executable
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            timeout: None,
        }
    }

    /// Kill ffmpeg and fail the clip when a single run exceeds `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the full ffmpeg argument list for a clip
    pub fn build_args(spec: &ClipSpec) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-y".into(), "-nostdin".into()];
        let operation = spec.operation();

        // Overlay trims inside the filter graph so timestamps can be reset there
        let seek_on_input = !matches!(operation, TranscodeOperation::OverlayHighlight { .. });

        if seek_on_input && spec.trim_start() > 0.0 {
            args.push("-ss".into());
            args.push(format_seconds(spec.trim_start()).into());
        }

        if matches!(operation, TranscodeOperation::Concat) {
            push_all(&mut args, ["-f", "concat", "-safe", "0"]);
        }

        args.push("-i".into());
        args.push(spec.source().as_os_str().to_os_string());

        if seek_on_input {
            if let Some(duration) = spec.trim_duration() {
                args.push("-t".into());
                args.push(format_seconds(duration).into());
            }
        }

        match operation {
            TranscodeOperation::StreamCopy { blank_tags } => {
                push_all(&mut args, ["-c", "copy", "-map", "0"]);
                for tag in blank_tags {
                    args.push("-metadata".into());
                    args.push(format!("{}=", tag).into());
                }
                push_all(&mut args, ["-movflags", "use_metadata_tags"]);
            }
            TranscodeOperation::AudioExtract(audio) => {
                args.push("-vn".into());
                args.push("-acodec".into());
                args.push(audio.codec.clone().into());
                args.push("-ar".into());
                args.push(audio.sample_rate.to_string().into());
                args.push("-ab".into());
                args.push(audio.bitrate.clone().into());
            }
            TranscodeOperation::CropScale { video, .. } => {
                push_filter(&mut args, "-vf", operation.video_filter());
                push_video_encoder(&mut args, video);
                push_all(&mut args, ["-c:a", "aac"]);
            }
            TranscodeOperation::OverlayHighlight { video, .. } => {
                push_filter(&mut args, "-vf", operation.video_filter());
                push_filter(&mut args, "-af", operation.audio_filter());
                push_video_encoder(&mut args, video);
                push_all(&mut args, ["-c:a", "aac"]);
            }
            TranscodeOperation::Concat => push_all(&mut args, ["-c", "copy"]),
            TranscodeOperation::Thumbnail { .. } => {
                push_all(&mut args, ["-vframes", "1"]);
                push_filter(&mut args, "-vf", operation.video_filter());
            }
        }

        args.push(spec.output().as_os_str().to_os_string());
        args
    }

    async fn run(&self, spec: &ClipSpec) -> DomainResult<std::process::Output> {
        let args = Self::build_args(spec);
        debug!("{} {:?}", self.ffmpeg_path.display(), args);

        let child = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DomainError::Transcode(format!(
                    "Failed to start {}: {}",
                    self.ffmpeg_path.display(),
                    e
                ))
            })?;

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| {
                    DomainError::Transcode(format!(
                        "ffmpeg did not finish {} within {}s and was killed",
                        spec.output().display(),
                        limit.as_secs()
                    ))
                })?,
            None => child.wait_with_output().await,
        };

        output.map_err(|e| DomainError::Transcode(format!("Failed to wait for ffmpeg: {}", e)))
    }
}

#[async_trait]
impl TranscodePort for FfmpegAdapter {
    async fn transcode(&self, spec: &ClipSpec) -> DomainResult<()> {
        let started = Instant::now();
        let output = self.run(spec).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::Transcode(format!(
                "ffmpeg exited with {} while writing {}: {}",
                output.status,
                spec.output().display(),
                stderr_tail(&stderr, STDERR_TAIL_LINES)
            )));
        }

        if !spec.output().is_file() {
            return Err(DomainError::Transcode(format!(
                "ffmpeg reported success but {} was not written",
                spec.output().display()
            )));
        }

        info!(
            "Wrote {} ({}) in {:.2}s",
            spec.output().display(),
            spec.mode(),
            started.elapsed().as_secs_f64()
        );
        Ok(())
    }
}

fn push_all<const N: usize>(args: &mut Vec<OsString>, values: [&str; N]) {
    args.extend(values.into_iter().map(OsString::from));
}

fn push_filter(args: &mut Vec<OsString>, flag: &str, filter: Option<String>) {
    if let Some(filter) = filter {
        args.push(flag.into());
        args.push(filter.into());
    }
}

fn push_video_encoder(args: &mut Vec<OsString>, video: &VideoProfile) {
    args.push("-c:v".into());
    args.push(video.codec.clone().into());
    args.push("-preset".into());
    args.push(video.preset.clone().into());
    args.push("-crf".into());
    args.push(video.crf.to_string().into());
}

/// Last `lines` non-empty lines of a process's stderr
fn stderr_tail(stderr: &str, lines: usize) -> String {
    let kept: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = kept.len().saturating_sub(lines);
    kept[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clip_spec::ClipSpecBuilder;
    use std::path::Path;

    fn args_of(spec: &ClipSpec) -> Vec<String> {
        FfmpegAdapter::build_args(spec)
            .into_iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    fn build(segment: SegmentDescriptor, mode: ClipMode, flags: ClipFlags) -> ClipSpec {
        ClipSpecBuilder::default()
            .build(&segment, Path::new("in.mp4"), Path::new("out"), mode, &flags)
            .unwrap()
    }

    #[test]
    fn test_stream_copy_args() {
        let spec = build(
            SegmentDescriptor { index: 2, start: 60.0, end: 120.0 },
            ClipMode::CopyStreams,
            ClipFlags::default(),
        );
        let output = Path::new("out").join("clip_2.mp4").to_string_lossy().to_string();

        assert_eq!(
            args_of(&spec),
            vec![
                "-y", "-nostdin", "-ss", "60", "-i", "in.mp4", "-t", "60", "-c", "copy", "-map",
                "0", "-metadata", "title=", "-metadata", "comment=", "-metadata", "artist=",
                "-movflags", "use_metadata_tags", output.as_str(),
            ]
        );
    }

    #[test]
    fn test_no_input_seek_at_zero() {
        let spec = build(
            SegmentDescriptor { index: 1, start: 0.0, end: 60.0 },
            ClipMode::CopyStreams,
            ClipFlags::default(),
        );
        let args = args_of(&spec);
        assert!(!args.contains(&"-ss".to_string()));
        assert_eq!(&args[2..6], &["-i", "in.mp4", "-t", "60"]);
    }

    #[test]
    fn test_audio_only_args() {
        let spec = build(
            SegmentDescriptor { index: 3, start: 120.0, end: 125.0 },
            ClipMode::AudioOnly,
            ClipFlags::default(),
        );
        let args = args_of(&spec);
        let tail: Vec<&str> = args[8..15].iter().map(String::as_str).collect();

        assert_eq!(&args[2..8], &["-ss", "120", "-i", "in.mp4", "-t", "5"]);
        assert_eq!(tail, vec!["-vn", "-acodec", "libmp3lame", "-ar", "44100", "-ab", "192k"]);
        assert!(args.last().unwrap().ends_with("clip_3.mp3"));
    }

    #[test]
    fn test_full_audio_has_no_trim() {
        let spec = ClipSpecBuilder::default().build_full_audio(Path::new("in.mp4"), Path::new("out"));
        let args = args_of(&spec);
        assert!(!args.contains(&"-ss".to_string()));
        assert!(!args.contains(&"-t".to_string()));
        assert!(args.last().unwrap().ends_with("full_audio.mp3"));
    }

    #[test]
    fn test_crop_scale_args() {
        let spec = build(
            SegmentDescriptor { index: 1, start: 0.0, end: 30.0 },
            ClipMode::CropScale,
            ClipFlags::default().with_video_dimensions(Some((1920, 1080))),
        );
        let args = args_of(&spec).join(" ");
        assert!(args.contains("-vf crop=606:1080:657:0,scale=1080:1920"));
        assert!(args.contains("-c:v libx264 -preset fast -crf 23"));
        assert!(args.contains("-c:a aac"));
    }

    #[test]
    fn test_overlay_args_trim_in_filter() {
        let spec = build(
            SegmentDescriptor { index: 1, start: 4.0, end: 9.0 },
            ClipMode::OverlayHighlight,
            ClipFlags::default().with_overlay_text("hello"),
        );
        let args = args_of(&spec);
        assert!(!args.contains(&"-ss".to_string()));
        assert!(!args.contains(&"-t".to_string()));

        let vf = args.iter().position(|a| a == "-vf").unwrap();
        assert!(args[vf + 1].starts_with("trim=start=4:end=9,setpts=PTS-STARTPTS,drawtext="));
        let af = args.iter().position(|a| a == "-af").unwrap();
        assert_eq!(args[af + 1], "atrim=start=4:end=9,asetpts=PTS-STARTPTS");
    }

    #[test]
    fn test_merge_args_read_concat_list() {
        let spec = ClipSpecBuilder::default()
            .build_merge(Path::new("filelist.txt"), Path::new("out"));
        let output = Path::new("out").join("merged.mp4").to_string_lossy().to_string();

        assert_eq!(
            args_of(&spec),
            vec![
                "-y", "-nostdin", "-f", "concat", "-safe", "0", "-i", "filelist.txt", "-c",
                "copy", output.as_str(),
            ]
        );
    }

    #[test]
    fn test_thumbnail_args() {
        let spec = ClipSpecBuilder::default().build_thumbnail(Path::new("clip_1.mp4"), 60.0);
        assert_eq!(
            args_of(&spec),
            vec![
                "-y", "-nostdin", "-ss", "1", "-i", "clip_1.mp4", "-vframes", "1", "-vf",
                "scale=-1:150", "clip_1.jpg",
            ]
        );
    }

    #[test]
    fn test_stderr_tail() {
        let stderr = "a\n\nb\nc\nd\n";
        assert_eq!(stderr_tail(stderr, 2), "c\nd");
        assert_eq!(stderr_tail(stderr, 10), "a\nb\nc\nd");
    }

    #[tokio::test]
    async fn test_missing_executable_is_transcode_error() {
        let adapter = FfmpegAdapter::new("/nonexistent/ffmpeg");
        let spec = build(
            SegmentDescriptor { index: 1, start: 0.0, end: 1.0 },
            ClipMode::CopyStreams,
            ClipFlags::default(),
        );
        let result = adapter.transcode(&spec).await;
        assert!(matches!(result, Err(DomainError::Transcode(_))));
    }
}
