use crate::cue::{CueEntry, ThumbnailRegion};
use crate::preload::PreloadTracker;
use serde::Serialize;
use std::sync::Arc;

/// The entry to show for a pointer position and where to put it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderInstruction<'a> {
    /// Position of the entry in its sequence
    pub index: usize,
    pub entry: &'a CueEntry,
    /// Left edge of the thumbnail, relative to the bar
    pub offset_px: f64,
}

impl<'a> RenderInstruction<'a> {
    pub fn region(&self) -> &'a ThumbnailRegion {
        &self.entry.region
    }
}

/// First entry whose half-open range covers `time`. Overlapping ranges
/// resolve to the earliest-listed entry.
pub fn find_cue(cues: &[CueEntry], time: f64) -> Option<(usize, &CueEntry)> {
    cues.iter().enumerate().find(|(_, entry)| entry.covers(time))
}

/// Horizontal offset that centres a `thumb_width` box on the pointer while
/// keeping it inside the bar.
pub fn placement(fraction: f64, bar_width: f64, thumb_width: u32) -> f64 {
    let x_pos = fraction * bar_width;
    let half = f64::from(thumb_width >> 1);
    let margin_left = x_pos - half;
    let margin_right = bar_width - (x_pos + half);

    if margin_left > 0.0 && margin_right > 0.0 {
        x_pos - half
    } else if margin_left <= 0.0 {
        0.0
    } else {
        bar_width - f64::from(thumb_width)
    }
}

/// Maps pointer positions on the progress bar to thumbnails
#[derive(Debug, Clone)]
pub struct ThumbnailLocator {
    preload: Arc<PreloadTracker>,
}

impl ThumbnailLocator {
    pub fn new(preload: Arc<PreloadTracker>) -> Self {
        Self { preload }
    }

    pub fn preload_tracker(&self) -> &Arc<PreloadTracker> {
        &self.preload
    }

    /// Locate the thumbnail for a pointer at `fraction` of a `bar_width_px`
    /// wide bar on a `duration_seconds` long video. `None` means hide.
    pub fn locate<'a>(
        &self,
        fraction: f64,
        bar_width_px: f64,
        duration_seconds: f64,
        cues: &'a [CueEntry],
    ) -> Option<RenderInstruction<'a>> {
        if fraction.is_nan() {
            return None;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        let time = fraction * duration_seconds;

        let (index, entry) = find_cue(cues, time)?;
        self.preload.request(entry.region.image_url());

        // Full images have no fixed width; their left edge tracks the pointer.
        let width = entry.region.width().unwrap_or(0);

        Some(RenderInstruction {
            index,
            entry,
            offset_px: placement(fraction, bar_width_px, width),
        })
    }
}
