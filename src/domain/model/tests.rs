// Unit tests for domain models

use super::*;

#[test]
fn test_time_spec_parse_seconds() {
    let time = TimeSpec::parse("123.456").unwrap();
    assert_eq!(time.seconds, 123.456);
}

#[test]
fn test_time_spec_parse_mm_ss() {
    let time = TimeSpec::parse("01:30.5").unwrap();
    assert_eq!(time.seconds, 90.5);
}

#[test]
fn test_time_spec_parse_hh_mm_ss() {
    let time = TimeSpec::parse("01:02:03.5").unwrap();
    assert_eq!(time.seconds, 3723.5);
}

#[test]
fn test_time_spec_parse_invalid() {
    assert!(TimeSpec::parse("invalid").is_err());
    assert!(TimeSpec::parse("00:60").is_err()); // Seconds out of range
    assert!(TimeSpec::parse("01:60:00").is_err()); // Minutes out of range
    assert!(TimeSpec::parse("-10").is_err());
    assert!(TimeSpec::parse("1:2:3:4").is_err());
    assert!(TimeSpec::parse("inf").is_err());
}

#[test]
fn test_time_spec_from_str() {
    let time: TimeSpec = "2:00".parse().unwrap();
    assert_eq!(time.seconds, 120.0);
}

#[test]
fn test_time_spec_display() {
    assert_eq!(TimeSpec::from_seconds(3723.456).to_string(), "1:02:03.456");
    assert_eq!(TimeSpec::from_seconds(123.456).to_string(), "02:03.456");
}

#[test]
fn test_media_duration_validation() {
    assert_eq!(MediaDuration::new(12.5).unwrap().seconds(), 12.5);
    assert!(MediaDuration::new(0.0).is_ok());
    assert!(matches!(MediaDuration::new(-1.0), Err(DomainError::Probe(_))));
    assert!(matches!(MediaDuration::new(f64::NAN), Err(DomainError::Probe(_))));
}

#[test]
fn test_effective_region_round_trips_through_window() {
    let region = EffectiveRegion {
        offset: 50.0,
        length: 100.0,
    };
    assert_eq!(region.end(), 150.0);
    assert_eq!(region.as_window(), TimeWindow::new(Some(50.0), Some(150.0)));
}

#[test]
fn test_media_info_video_dimensions() {
    let info = MediaInfo::new(
        MediaDuration::new(10.0).unwrap(),
        vec![
            StreamInfo {
                index: 0,
                kind: StreamKind::Audio,
                codec: Some("aac".to_string()),
                width: None,
                height: None,
            },
            StreamInfo {
                index: 1,
                kind: StreamKind::Video,
                codec: Some("h264".to_string()),
                width: Some(1920),
                height: Some(1080),
            },
        ],
    );

    assert_eq!(info.video_dimensions(), Some((1920, 1080)));
}

#[test]
fn test_media_info_without_video() {
    let info = MediaInfo::new(MediaDuration::new(10.0).unwrap(), vec![]);
    assert_eq!(info.video_dimensions(), None);
}

#[test]
fn test_clip_mode_extension() {
    assert_eq!(ClipMode::AudioOnly.extension(), "mp3");
    assert_eq!(ClipMode::CopyStreams.extension(), "mp4");
    assert_eq!(ClipMode::CropScale.extension(), "mp4");
    assert_eq!(ClipMode::OverlayHighlight.extension(), "mp4");
    assert_eq!(ClipMode::Merge.extension(), "mp4");
    assert_eq!(ClipMode::Thumbnail.extension(), "jpg");
}

#[test]
fn test_crop_scale_video_filter() {
    let op = TranscodeOperation::CropScale {
        crop: CropGeometry {
            width: 606,
            height: 1080,
            x: 657,
            y: 0,
        },
        target: (1080, 1920),
        video: VideoProfile::default(),
    };

    assert_eq!(
        op.video_filter().as_deref(),
        Some("crop=606:1080:657:0,scale=1080:1920")
    );
    assert_eq!(op.audio_filter(), None);
    assert_eq!(op.mode(), ClipMode::CropScale);
}

#[test]
fn test_overlay_filters_trim_and_reset_timestamps() {
    let op = TranscodeOperation::OverlayHighlight {
        start: 3.0,
        end: 7.5,
        text: "Hello".to_string(),
        overlay: OverlayProfile::default(),
        video: VideoProfile::default(),
    };

    let video = op.video_filter().unwrap();
    assert!(video.starts_with("trim=start=3:end=7.5,setpts=PTS-STARTPTS,drawtext="));
    assert!(video.contains("text='Hello'"));
    assert!(video.contains("fontsize=48"));
    assert!(video.contains("fontcolor=white"));
    assert_eq!(
        op.audio_filter().as_deref(),
        Some("atrim=start=3:end=7.5,asetpts=PTS-STARTPTS")
    );
}

#[test]
fn test_escape_drawtext() {
    assert_eq!(escape_drawtext("a:b"), "a\\:b");
    assert_eq!(escape_drawtext("100%"), "100%");
    assert_eq!(escape_drawtext("C:\\dir"), "C\\:\\\\dir");
    assert_eq!(escape_drawtext("it's"), "it\u{2019}s");
    assert_eq!(escape_drawtext("two\nlines"), "two lines");
}

#[test]
fn test_batch_report_total_outputs() {
    let mut first = ClipOutcome::new("a.mp4", "out/a");
    first.outputs = vec!["out/a/clip_1.mp4".into(), "out/a/clip_2.mp4".into()];
    let second = ClipOutcome::new("b.mp4", "out/b");

    let report = BatchReport {
        completed: vec![first, second.clone()],
        failed: vec![],
    };

    assert_eq!(report.total_outputs(), 2);
    assert!(second.is_noop());
}

#[test]
fn test_clip_source_parse() {
    assert_eq!(
        ClipSource::parse("https://youtu.be/abc"),
        ClipSource::Remote("https://youtu.be/abc".to_string())
    );
    assert_eq!(
        ClipSource::parse("videos/a.mp4"),
        ClipSource::Local(PathBuf::from("videos/a.mp4"))
    );
}

#[test]
fn test_clip_settings_validate() {
    assert!(ClipSettings::new(60.0, ClipMode::AudioOnly)
        .with_full_audio(true)
        .validate()
        .is_ok());
    assert!(matches!(
        ClipSettings::new(60.0, ClipMode::CopyStreams)
            .with_full_audio(true)
            .validate(),
        Err(DomainError::BadArgs(_))
    ));
    assert!(matches!(
        ClipSettings::new(60.0, ClipMode::OverlayHighlight).validate(),
        Err(DomainError::BadArgs(_))
    ));
}

#[test]
fn test_overlay_text_with_percent_and_colon_disables_expansion() {
    let op = TranscodeOperation::OverlayHighlight {
        start: 0.0,
        end: 2.0,
        text: "50% off: now".to_string(),
        overlay: OverlayProfile::default(),
        video: VideoProfile::default(),
    };

    let video = op.video_filter().unwrap();
    assert!(video.contains("drawtext=text='50% off\\: now':expansion=none:"));
}

#[test]
fn test_merge_and_thumbnail_are_not_splitting_modes() {
    for mode in [ClipMode::Merge, ClipMode::Thumbnail] {
        assert!(matches!(
            ClipSettings::new(60.0, mode).validate(),
            Err(DomainError::BadArgs(_))
        ));
    }
}

#[test]
fn test_thumbnails_rejected_for_audio_only() {
    assert!(ClipSettings::new(60.0, ClipMode::CropScale)
        .with_thumbnails(true)
        .validate()
        .is_ok());
    assert!(matches!(
        ClipSettings::new(60.0, ClipMode::AudioOnly)
            .with_thumbnails(true)
            .validate(),
        Err(DomainError::BadArgs(_))
    ));
}

#[test]
fn test_thumbnail_operation_scales_to_height() {
    let op = TranscodeOperation::Thumbnail { height: 150 };
    assert_eq!(op.mode(), ClipMode::Thumbnail);
    assert_eq!(op.video_filter(), Some("scale=-1:150".to_string()));
    assert_eq!(op.audio_filter(), None);
    assert_eq!(TranscodeOperation::Concat.video_filter(), None);
}
