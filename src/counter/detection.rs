//! Tracked detections handed over by the external detector and tracker.

use crate::counter::rect::Rect;

/// One tracked object in one frame.
///
/// Boxes are in detection space. The track id comes from the tracker and is
/// trusted as-is: ids need not be contiguous or increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub track_id: u64,
    /// Bounding box in detection space
    pub bbox: Rect,
    /// Class name reported by the detector, e.g. "car"
    pub class_label: String,
    /// Detection confidence score
    pub confidence: f32,
}

impl Detection {
    /// Create a detection from a TLBR box.
    pub fn new(
        track_id: u64,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        class_label: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            track_id,
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
            class_label: class_label.into(),
            confidence,
        }
    }

    pub fn from_rect(
        track_id: u64,
        bbox: Rect,
        class_label: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            track_id,
            bbox,
            class_label: class_label.into(),
            confidence,
        }
    }
}
