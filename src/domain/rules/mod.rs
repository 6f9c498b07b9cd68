// Domain rules - Timeline arithmetic and selection policies

use crate::domain::errors::*;
use crate::domain::model::*;


/// Ratios closer than this to an integer count as that integer
const COUNT_EPSILON: f64 = 1e-9;

/// Shortest region or trailing segment worth a clip; ffmpeg times are written
/// with microsecond precision
pub const MIN_SEGMENT_SECONDS: f64 = 1e-6;

/// Applies an optional start/end window to the source duration
pub struct WindowClamper;

impl WindowClamper {
    /// Clamp `window` against `duration` into the region to segment.
    ///
    /// The end is clamped against the raw source duration before the offset is
    /// subtracted, so the offset is never counted twice.
    pub fn clamp(duration: MediaDuration, window: &TimeWindow) -> DomainResult<EffectiveRegion> {
        let offset = window.start.unwrap_or(0.0);
        let effective_end = match window.end {
            Some(end) => duration.seconds().min(end),
            None => duration.seconds(),
        };

        if !offset.is_finite() || !effective_end.is_finite() {
            return Err(DomainError::InvalidWindow(format!(
                "Window bounds must be finite (start {}, end {})",
                offset, effective_end
            )));
        }
        if offset < 0.0 {
            return Err(DomainError::InvalidWindow(format!(
                "Start cannot be negative ({})",
                offset
            )));
        }
        if offset >= effective_end {
            return Err(DomainError::InvalidWindow(format!(
                "Start ({:.3}s) must be before the effective end ({:.3}s) of a {} source",
                offset, effective_end, duration
            )));
        }

        let length = effective_end - offset;
        if length < MIN_SEGMENT_SECONDS {
            return Err(DomainError::InvalidWindow(format!(
                "Window from {}s is shorter than {}s",
                offset, MIN_SEGMENT_SECONDS
            )));
        }

        Ok(EffectiveRegion { offset, length })
    }
}

/// Splits a region into consecutive clips of a fixed duration
pub struct SegmentPlanner;

impl SegmentPlanner {
    /// Plan the segments covering `region`, each at most `clip_duration` long
    pub fn plan(region: EffectiveRegion, clip_duration: f64) -> DomainResult<SegmentPlan> {
        Self::validate_clip_duration(clip_duration)?;

        let count = if region.length > 0.0 {
            Self::segment_count(region.length, clip_duration)
        } else {
            0
        };

        Ok(SegmentPlan {
            region,
            clip_duration,
            count,
        })
    }

    /// Reject non-positive or non-finite clip durations
    pub fn validate_clip_duration(clip_duration: f64) -> DomainResult<()> {
        if !clip_duration.is_finite() || clip_duration <= 0.0 {
            return Err(DomainError::InvalidDuration(format!(
                "Clip duration must be a positive number of seconds, got {}",
                clip_duration
            )));
        }
        Ok(())
    }

    fn segment_count(length: f64, clip_duration: f64) -> usize {
        let ratio = length / clip_duration;
        let nearest = ratio.round();
        let mut count = if (ratio - nearest).abs() < COUNT_EPSILON {
            nearest as usize
        } else {
            ratio.ceil() as usize
        };

        // A sub-microsecond remainder is folded into the previous segment
        if count > 1 && length - (count - 1) as f64 * clip_duration < MIN_SEGMENT_SECONDS {
            count -= 1;
        }
        count.max(1)
    }
}

/// Ordered, restartable sequence of segments for one region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPlan {
    region: EffectiveRegion,
    clip_duration: f64,
    count: usize,
}

impl SegmentPlan {
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Fresh iterator over the descriptors, in emission order
    pub fn iter(&self) -> Segments {
        Segments {
            plan: *self,
            next: 0,
        }
    }

    fn descriptor(&self, i: usize) -> SegmentDescriptor {
        let region_end = self.region.end();
        let start = self.region.offset + i as f64 * self.clip_duration;
        let end = if i + 1 == self.count {
            region_end
        } else {
            (self.region.offset + (i + 1) as f64 * self.clip_duration).min(region_end)
        };
        SegmentDescriptor {
            index: i + 1,
            start,
            end,
        }
    }
}

impl<'a> IntoIterator for &'a SegmentPlan {
    type Item = SegmentDescriptor;
    type IntoIter = Segments;

    fn into_iter(self) -> Segments {
        self.iter()
    }
}

/// Lazy iterator produced by [`SegmentPlan::iter`]
#[derive(Debug, Clone)]
pub struct Segments {
    plan: SegmentPlan,
    next: usize,
}

impl Iterator for Segments {
    type Item = SegmentDescriptor;

    fn next(&mut self) -> Option<SegmentDescriptor> {
        if self.next >= self.plan.count {
            return None;
        }
        let descriptor = self.plan.descriptor(self.next);
        self.next += 1;
        Some(descriptor)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.plan.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Segments {}

/// Sub-range chosen from a transcript
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Highlight {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(Some(self.start), Some(self.end))
    }
}

/// Picks the transcript range to clip.
///
/// Policy: the first segment wins; the rest are ignored.
pub struct HighlightSelector;

impl HighlightSelector {
    pub fn select(segments: &[TranscriptSegment]) -> Option<Highlight> {
        segments.first().map(|segment| Highlight {
            start: segment.start,
            end: segment.end,
            text: segment.text.trim().to_string(),
        })
    }
}
